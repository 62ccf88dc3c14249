//! Route definitions for filter rule administration, mounted under
//! `/storage-sources`.
//!
//! ```text
//! GET /{id}/filter-rules -> list_rules
//! PUT /{id}/filter-rules -> save_rules
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::filter_rules;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}/filter-rules",
        get(filter_rules::list_rules).put(filter_rules::save_rules),
    )
}
