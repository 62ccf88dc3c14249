use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fileshelf_api::config::ServerConfig;
use fileshelf_api::router::build_app_router;
use fileshelf_api::state::AppState;
use fileshelf_events::EventBus;
use fileshelf_filter::{FilterRuleSync, FilterService};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fileshelf_api=debug,fileshelf_filter=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = fileshelf_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    fileshelf_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    fileshelf_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Events + filter service ---
    let event_bus = Arc::new(EventBus::default());
    let filter = Arc::new(FilterService::new(pool.clone()));

    // Keep filter rules in step with storage-source deletion/duplication.
    tokio::spawn(FilterRuleSync::run(filter.clone(), event_bus.subscribe()));

    // --- Router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus,
        filter,
    };
    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT combination");
    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
