//! Storage source entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use fileshelf_core::types::{DbId, Timestamp};

/// A row from the `storage_sources` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StorageSource {
    pub id: DbId,
    pub name: String,
    /// Backend kind, e.g. `local`, `onedrive`, `onedrive_china`.
    pub source_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new storage source.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStorageSource {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "source_type must be 1-50 characters"))]
    pub source_type: String,
}
