//! Filter rule service: decision entry points and rule-set mutation.
//!
//! Decision semantics, in order:
//! 1. An empty rule list short-circuits to "not filtered".
//! 2. A user holding the `ignore_hidden` operator permission on the
//!    storage source bypasses all filtering.
//! 3. Rules are scanned in insertion order; the first matching non-empty
//!    expression wins. A malformed expression is logged and treated as
//!    non-matching; one broken rule must not disable the rest of the set.

use std::sync::Arc;

use fileshelf_core::operators::OPERATOR_IGNORE_HIDDEN;
use fileshelf_core::paths::parent_path;
use fileshelf_core::types::DbId;
use fileshelf_db::models::filter_rule::{FilterRule, RuleMode, SaveFilterRule};
use fileshelf_db::repositories::{FilterRuleRepo, UserPermissionRepo};
use fileshelf_db::DbPool;

use crate::cache::{RuleCache, RuleScope};

/// Per-storage-source visibility/access filtering.
///
/// Shared as `Arc<FilterService>`; read paths are safe for concurrent use.
pub struct FilterService {
    pool: DbPool,
    cache: RuleCache,
}

impl FilterService {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            cache: RuleCache::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Cached reads
    // -----------------------------------------------------------------------

    /// Full rule list of a storage source, in evaluation order (cached).
    ///
    /// An unknown storage source yields an empty list, not an error.
    pub async fn rules(&self, storage_source_id: DbId) -> Result<Arc<Vec<FilterRule>>, sqlx::Error> {
        self.rules_for(storage_source_id, RuleScope::All).await
    }

    /// Cache-aside load of one view of a source's rules.
    async fn rules_for(
        &self,
        storage_source_id: DbId,
        scope: RuleScope,
    ) -> Result<Arc<Vec<FilterRule>>, sqlx::Error> {
        if let Some(cached) = self.cache.get(storage_source_id, scope) {
            return Ok(cached);
        }

        let rows = match scope {
            RuleScope::All => {
                FilterRuleRepo::find_by_storage_source(&self.pool, storage_source_id).await?
            }
            RuleScope::Mode(mode) => {
                FilterRuleRepo::find_by_storage_source_and_mode(&self.pool, storage_source_id, mode)
                    .await?
            }
        };

        let rules = Arc::new(rows);
        self.cache.insert(storage_source_id, scope, rules.clone());
        Ok(rules)
    }

    // -----------------------------------------------------------------------
    // Decision entry points
    // -----------------------------------------------------------------------

    /// Whether `file_name` is hidden from listings on this storage source.
    ///
    /// The hidden check evaluates the full rule list: a name matched by a
    /// rule of any mode is not shown.
    pub async fn check_hidden(
        &self,
        user_id: Option<DbId>,
        storage_source_id: DbId,
        file_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let rules = self.rules_for(storage_source_id, RuleScope::All).await?;
        self.test_rules(user_id, storage_source_id, &rules, file_name)
            .await
    }

    /// Whether `path` may not be opened on this storage source.
    pub async fn check_inaccessible(
        &self,
        user_id: Option<DbId>,
        storage_source_id: DbId,
        path: &str,
    ) -> Result<bool, sqlx::Error> {
        let rules = self
            .rules_for(storage_source_id, RuleScope::Mode(RuleMode::Inaccessible))
            .await?;
        self.test_rules(user_id, storage_source_id, &rules, path).await
    }

    /// Whether downloading `file_name` is blocked on this storage source.
    ///
    /// Evaluated against the file name and, when present, its parent path,
    /// so a rule written against a directory blocks every file beneath it.
    pub async fn check_disable_download(
        &self,
        user_id: Option<DbId>,
        storage_source_id: DbId,
        file_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let rules = self
            .rules_for(storage_source_id, RuleScope::Mode(RuleMode::DisableDownload))
            .await?;

        if self
            .test_rules(user_id, storage_source_id, &rules, file_name)
            .await?
        {
            return Ok(true);
        }

        match parent_path(file_name) {
            Some(parent) => {
                self.test_rules(user_id, storage_source_id, &rules, parent)
                    .await
            }
            None => Ok(false),
        }
    }

    /// The shared decision procedure over an already-loaded rule list.
    async fn test_rules(
        &self,
        user_id: Option<DbId>,
        storage_source_id: DbId,
        rules: &[FilterRule],
        candidate: &str,
    ) -> Result<bool, sqlx::Error> {
        if rules.is_empty() {
            tracing::debug!(storage_source_id, candidate, "No filter rules configured");
            return Ok(false);
        }

        if let Some(user_id) = user_id {
            let bypass = UserPermissionRepo::has_operator(
                &self.pool,
                user_id,
                storage_source_id,
                OPERATOR_IGNORE_HIDDEN,
            )
            .await?;
            if bypass {
                tracing::debug!(
                    storage_source_id,
                    user_id,
                    "User bypasses filter rules on this storage source"
                );
                return Ok(false);
            }
        }

        Ok(match_any_rule(storage_source_id, rules, candidate))
    }

    // -----------------------------------------------------------------------
    // Rule set mutation
    // -----------------------------------------------------------------------

    /// Atomically replace the rule set of a storage source.
    ///
    /// A failure rolls the replacement back and leaves both the stored set
    /// and the cache untouched; the cache is invalidated only after commit.
    pub async fn batch_save(
        &self,
        storage_source_id: DbId,
        rules: &[SaveFilterRule],
    ) -> Result<Vec<FilterRule>, sqlx::Error> {
        let saved = FilterRuleRepo::replace_all(&self.pool, storage_source_id, rules).await?;
        self.cache.invalidate(storage_source_id);

        tracing::info!(
            storage_source_id,
            count = saved.len(),
            "Replaced filter rule set"
        );
        Ok(saved)
    }

    /// Delete every rule of a storage source. Returns the number removed.
    ///
    /// Also the cascade path invoked when the owning storage source is
    /// deleted (see [`FilterRuleSync`](crate::sync::FilterRuleSync)).
    pub async fn delete_by_storage_source(
        &self,
        storage_source_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let removed =
            FilterRuleRepo::delete_by_storage_source(&self.pool, storage_source_id).await?;
        self.cache.invalidate(storage_source_id);

        tracing::info!(storage_source_id, removed, "Deleted filter rules");
        Ok(removed)
    }

    /// Copy every rule of `from_id` under `new_id`, preserving order.
    ///
    /// No cache write happens here; views of the new source populate
    /// lazily on first read.
    pub async fn duplicate(&self, from_id: DbId, new_id: DbId) -> Result<u64, sqlx::Error> {
        let copied = FilterRuleRepo::duplicate(&self.pool, from_id, new_id).await?;
        // A view of the new source read between its creation and this copy
        // would have been cached empty; drop it so reads reload.
        self.cache.invalidate(new_id);

        tracing::info!(from_id, new_id, copied, "Duplicated filter rules");
        Ok(copied)
    }
}

/// First-match-wins scan of `candidate` over an ordered rule list.
///
/// Empty expressions are inert; a malformed expression is logged and
/// skipped rather than aborting the scan.
fn match_any_rule(storage_source_id: DbId, rules: &[FilterRule], candidate: &str) -> bool {
    for rule in rules {
        if rule.expression.is_empty() {
            tracing::debug!(
                storage_source_id,
                rule_id = rule.id,
                "Skipping filter rule with empty expression"
            );
            continue;
        }

        match fileshelf_core::glob::match_glob(&rule.expression, candidate) {
            Ok(true) => {
                tracing::debug!(
                    storage_source_id,
                    rule_id = rule.id,
                    expression = %rule.expression,
                    candidate,
                    "Filter rule matched"
                );
                return true;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::error!(
                    storage_source_id,
                    rule_id = rule.id,
                    expression = %rule.expression,
                    candidate,
                    error = %e,
                    "Filter rule expression failed to compile, skipping rule"
                );
            }
        }
    }

    false
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: DbId, expression: &str, mode: RuleMode) -> FilterRule {
        FilterRule {
            id,
            storage_source_id: 1,
            expression: expression.to_string(),
            mode,
            description: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn empty_list_matches_nothing() {
        assert!(!match_any_rule(1, &[], "a.tmp"));
    }

    #[test]
    fn single_rule_match_and_miss() {
        let rules = vec![rule(1, "*.tmp", RuleMode::Hidden)];
        assert!(match_any_rule(1, &rules, "a.tmp"));
        assert!(!match_any_rule(1, &rules, "a.txt"));
    }

    #[test]
    fn first_match_wins_over_later_rules() {
        // Both rules match; the scan must stop at the first. The second
        // rule being malformed proves it was never evaluated.
        let rules = vec![
            rule(1, "*.tmp", RuleMode::Hidden),
            rule(2, "[unclosed", RuleMode::Hidden),
        ];
        assert!(match_any_rule(1, &rules, "a.tmp"));
    }

    #[test]
    fn empty_expression_is_inert() {
        let rules = vec![
            rule(1, "", RuleMode::Hidden),
            rule(2, "*.log", RuleMode::Hidden),
        ];
        assert!(match_any_rule(1, &rules, "build.log"));
        assert!(!match_any_rule(1, &rules, "")); // empty rule matches nothing, not everything
    }

    #[test]
    fn malformed_expression_does_not_abort_the_scan() {
        let rules = vec![
            rule(1, "[unclosed", RuleMode::Hidden),
            rule(2, "*.tmp", RuleMode::Hidden),
        ];
        assert!(match_any_rule(1, &rules, "a.tmp"));
    }

    #[test]
    fn no_rule_matches_returns_false() {
        let rules = vec![
            rule(1, "*.tmp", RuleMode::Hidden),
            rule(2, "*.bak", RuleMode::Hidden),
        ];
        assert!(!match_any_rule(1, &rules, "notes.txt"));
    }
}
