//! Filter rule entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use fileshelf_core::types::{DbId, Timestamp};

/// Which restriction a filter rule enforces.
///
/// Stored as lowercase text in the `mode` column (see the CHECK constraint
/// in the `filter_rules` migration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RuleMode {
    /// Matching entries are omitted from directory listings.
    Hidden,
    /// Matching paths cannot be opened at all.
    Inaccessible,
    /// Matching files (or files under a matching directory) cannot be downloaded.
    DisableDownload,
}

/// A row from the `filter_rules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FilterRule {
    pub id: DbId,
    pub storage_source_id: DbId,
    /// Glob expression; an empty expression makes the rule inert.
    pub expression: String,
    pub mode: RuleMode,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for one rule in a batch save. Ids are never supplied by callers;
/// every save assigns fresh ones.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveFilterRule {
    #[validate(length(max = 1024, message = "expression must be at most 1024 characters"))]
    pub expression: String,
    pub mode: RuleMode,
    #[validate(length(max = 255, message = "description must be at most 255 characters"))]
    pub description: Option<String>,
}
