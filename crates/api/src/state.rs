use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fileshelf_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Channel for storage-source lifecycle events.
    pub event_bus: Arc<fileshelf_events::EventBus>,
    /// Filter rule service (decisions, cached reads, mutation).
    pub filter: Arc<fileshelf_filter::FilterService>,
}
