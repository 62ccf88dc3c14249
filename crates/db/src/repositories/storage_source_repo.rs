//! Repository for the `storage_sources` table.

use sqlx::PgPool;

use fileshelf_core::types::DbId;

use crate::models::storage_source::{CreateStorageSource, StorageSource};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, source_type, created_at, updated_at";

/// Provides CRUD operations for storage sources.
pub struct StorageSourceRepo;

impl StorageSourceRepo {
    /// Insert a new storage source.
    pub async fn create(
        pool: &PgPool,
        input: &CreateStorageSource,
    ) -> Result<StorageSource, sqlx::Error> {
        let query = format!(
            "INSERT INTO storage_sources (name, source_type) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StorageSource>(&query)
            .bind(&input.name)
            .bind(&input.source_type)
            .fetch_one(pool)
            .await
    }

    /// Find a storage source by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<StorageSource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM storage_sources WHERE id = $1");
        sqlx::query_as::<_, StorageSource>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a storage source. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM storage_sources WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a copy of an existing storage source under a new name.
    ///
    /// Only the source row is copied here; dependent configuration (filter
    /// rules) is copied by its owning service in reaction to the
    /// duplication event.
    pub async fn duplicate(
        pool: &PgPool,
        source: &StorageSource,
        new_name: &str,
    ) -> Result<StorageSource, sqlx::Error> {
        let query = format!(
            "INSERT INTO storage_sources (name, source_type) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StorageSource>(&query)
            .bind(new_name)
            .bind(&source.source_type)
            .fetch_one(pool)
            .await
    }
}
