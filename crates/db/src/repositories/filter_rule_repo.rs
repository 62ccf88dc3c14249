//! Repository for the `filter_rules` table.
//!
//! All reads `ORDER BY id`: insertion order is rule evaluation order and
//! must be stable.

use sqlx::PgPool;

use fileshelf_core::types::DbId;

use crate::models::filter_rule::{FilterRule, RuleMode, SaveFilterRule};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, storage_source_id, expression, mode, description, created_at";

/// Provides CRUD operations for filter rules.
pub struct FilterRuleRepo;

impl FilterRuleRepo {
    /// All rules for a storage source, in insertion order.
    pub async fn find_by_storage_source(
        pool: &PgPool,
        storage_source_id: DbId,
    ) -> Result<Vec<FilterRule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM filter_rules WHERE storage_source_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, FilterRule>(&query)
            .bind(storage_source_id)
            .fetch_all(pool)
            .await
    }

    /// Rules of one mode for a storage source, in insertion order.
    pub async fn find_by_storage_source_and_mode(
        pool: &PgPool,
        storage_source_id: DbId,
        mode: RuleMode,
    ) -> Result<Vec<FilterRule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM filter_rules \
             WHERE storage_source_id = $1 AND mode = $2 ORDER BY id"
        );
        sqlx::query_as::<_, FilterRule>(&query)
            .bind(storage_source_id)
            .bind(mode)
            .fetch_all(pool)
            .await
    }

    /// Atomically replace the full rule set of a storage source.
    ///
    /// Deletes every existing rule, then inserts the new list with fresh
    /// ids, inside one transaction. A failure partway through rolls back
    /// and leaves the previous set intact.
    pub async fn replace_all(
        pool: &PgPool,
        storage_source_id: DbId,
        rules: &[SaveFilterRule],
    ) -> Result<Vec<FilterRule>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM filter_rules WHERE storage_source_id = $1")
            .bind(storage_source_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO filter_rules (storage_source_id, expression, mode, description) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );

        let mut inserted = Vec::with_capacity(rules.len());
        for rule in rules {
            let row = sqlx::query_as::<_, FilterRule>(&query)
                .bind(storage_source_id)
                .bind(&rule.expression)
                .bind(rule.mode)
                .bind(&rule.description)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(row);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Delete every rule of a storage source. Returns the number of rows removed.
    pub async fn delete_by_storage_source(
        pool: &PgPool,
        storage_source_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM filter_rules WHERE storage_source_id = $1")
            .bind(storage_source_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Copy every rule of `from_id` under `new_id` with fresh ids,
    /// preserving the original insertion order. Returns the number of
    /// rules copied.
    pub async fn duplicate(
        pool: &PgPool,
        from_id: DbId,
        new_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // INSERT ... SELECT would not guarantee insertion order follows the
        // source id order, so copy row by row.
        let source: Vec<FilterRule> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM filter_rules WHERE storage_source_id = $1 ORDER BY id"
        ))
        .bind(from_id)
        .fetch_all(&mut *tx)
        .await?;

        for rule in &source {
            sqlx::query(
                "INSERT INTO filter_rules (storage_source_id, expression, mode, description) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(new_id)
            .bind(&rule.expression)
            .bind(rule.mode)
            .bind(&rule.description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(source.len() as u64)
    }
}
