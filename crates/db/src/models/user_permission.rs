//! Per-user, per-storage-source operator permission model.

use serde::Serialize;
use sqlx::FromRow;

use fileshelf_core::types::{DbId, Timestamp};

/// A row from the `user_storage_permissions` table.
///
/// `operator` values come from `fileshelf_core::operators`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserStoragePermission {
    pub id: DbId,
    pub user_id: DbId,
    pub storage_source_id: DbId,
    pub operator: String,
    pub created_at: Timestamp,
}
