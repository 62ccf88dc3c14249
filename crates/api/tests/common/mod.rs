//! Shared helpers for API integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fileshelf_api::config::ServerConfig;
use fileshelf_api::router::build_app_router;
use fileshelf_api::state::AppState;
use fileshelf_events::EventBus;
use fileshelf_filter::{FilterRuleSync, FilterService};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Mirrors the wiring in `main.rs` (same middleware stack, same background
/// `FilterRuleSync` subscription) so integration tests exercise what
/// production runs.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let event_bus = Arc::new(EventBus::default());
    let filter = Arc::new(FilterService::new(pool.clone()));

    tokio::spawn(FilterRuleSync::run(filter.clone(), event_bus.subscribe()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus,
        filter,
    };
    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Issue a request with a JSON body against the app.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Issue a bodyless request (DELETE / POST without payload) against the app.
pub async fn send(app: Router, method: &str, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert a status and return the JSON body.
pub async fn expect_json(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
