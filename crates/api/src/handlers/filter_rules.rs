//! Handlers for per-storage-source filter rule administration.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use fileshelf_core::error::CoreError;
use fileshelf_core::types::DbId;
use fileshelf_db::models::filter_rule::SaveFilterRule;
use fileshelf_db::repositories::StorageSourceRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of a rule-set save: the complete new list, replacing whatever is
/// stored.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveFilterRulesRequest {
    #[validate(nested)]
    pub rules: Vec<SaveFilterRule>,
}

/// GET /api/v1/storage-sources/{id}/filter-rules
///
/// List the rule set of a storage source in evaluation order.
pub async fn list_rules(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rules = state.filter.rules(id).await?;
    Ok(Json(DataResponse {
        data: rules.as_ref().clone(),
    }))
}

/// PUT /api/v1/storage-sources/{id}/filter-rules
///
/// Atomically replace the rule set of a storage source.
pub async fn save_rules(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SaveFilterRulesRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    StorageSourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "storage_source",
            id,
        })?;

    let saved = state.filter.batch_save(id, &input.rules).await?;
    Ok(Json(DataResponse { data: saved }))
}
