//! Route definitions for the storage-source lifecycle, mounted under
//! `/storage-sources`.
//!
//! ```text
//! POST   /                -> create_source
//! DELETE /{id}            -> delete_source
//! POST   /{id}/duplicate  -> duplicate_source
//! ```

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::storage_sources;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(storage_sources::create_source))
        .route("/{id}", delete(storage_sources::delete_source))
        .route("/{id}/duplicate", post(storage_sources::duplicate_source))
}
