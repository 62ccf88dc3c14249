//! Handlers for the storage-source lifecycle.
//!
//! Deletion and duplication publish the corresponding [`StorageEvent`]
//! after the database write commits; dependent subsystems (filter rules)
//! react through their bus subscriptions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use fileshelf_core::error::CoreError;
use fileshelf_core::types::DbId;
use fileshelf_db::models::storage_source::CreateStorageSource;
use fileshelf_db::repositories::StorageSourceRepo;
use fileshelf_events::StorageEvent;
use fileshelf_storage::SourceKind;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/storage-sources
///
/// Register a new storage source.
pub async fn create_source(
    State(state): State<AppState>,
    Json(input): Json<CreateStorageSource>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if SourceKind::from_name(&input.source_type).is_none() {
        return Err(AppError::BadRequest(format!(
            "unknown source_type '{}'",
            input.source_type
        )));
    }

    let source = StorageSourceRepo::create(&state.pool, &input).await?;

    tracing::info!(storage_source_id = source.id, name = %source.name, "Storage source created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: source })))
}

/// DELETE /api/v1/storage-sources/{id}
///
/// Remove a storage source and notify dependents.
pub async fn delete_source(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let source = StorageSourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "storage_source",
            id,
        })?;

    StorageSourceRepo::delete(&state.pool, id).await?;

    state.event_bus.publish(StorageEvent::SourceDeleted {
        id,
        name: source.name.clone(),
    });

    tracing::info!(storage_source_id = id, name = %source.name, "Storage source deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/storage-sources/{id}/duplicate
///
/// Clone a storage source. Per-source configuration (filter rules) is
/// copied asynchronously by the subscribers of the duplication event.
pub async fn duplicate_source(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let source = StorageSourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "storage_source",
            id,
        })?;

    let new_name = format!("{} (copy)", source.name);
    let copy = StorageSourceRepo::duplicate(&state.pool, &source, &new_name).await?;

    state.event_bus.publish(StorageEvent::SourceDuplicated {
        from_id: id,
        new_id: copy.id,
    });

    tracing::info!(
        from_id = id,
        new_id = copy.id,
        "Storage source duplicated"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: copy })))
}
