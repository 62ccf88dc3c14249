//! Route definitions.

pub mod filter_rules;
pub mod health;
pub mod storage_sources;

use axum::Router;

use crate::state::AppState;

/// All versioned API routes, mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest(
        "/storage-sources",
        storage_sources::router().merge(filter_rules::router()),
    )
}
