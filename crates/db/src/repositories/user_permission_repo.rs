//! Repository for the `user_storage_permissions` table.

use sqlx::PgPool;

use fileshelf_core::types::DbId;

use crate::models::user_permission::UserStoragePermission;

/// Provides lookups and grants for per-storage-source operator permissions.
pub struct UserPermissionRepo;

impl UserPermissionRepo {
    /// Grant an operator permission to a user on a storage source.
    ///
    /// Granting an already-held permission is a no-op.
    pub async fn grant(
        pool: &PgPool,
        user_id: DbId,
        storage_source_id: DbId,
        operator: &str,
    ) -> Result<UserStoragePermission, sqlx::Error> {
        sqlx::query_as::<_, UserStoragePermission>(
            "INSERT INTO user_storage_permissions (user_id, storage_source_id, operator) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_user_storage_operator DO UPDATE SET operator = EXCLUDED.operator \
             RETURNING id, user_id, storage_source_id, operator, created_at",
        )
        .bind(user_id)
        .bind(storage_source_id)
        .bind(operator)
        .fetch_one(pool)
        .await
    }

    /// Whether a user holds an operator permission on a storage source.
    pub async fn has_operator(
        pool: &PgPool,
        user_id: DbId,
        storage_source_id: DbId,
        operator: &str,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS ( \
                 SELECT 1 FROM user_storage_permissions \
                 WHERE user_id = $1 AND storage_source_id = $2 AND operator = $3 \
             )",
        )
        .bind(user_id)
        .bind(storage_source_id)
        .bind(operator)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
