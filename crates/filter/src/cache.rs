//! Explicit cache-aside store for per-storage-source rule lists.
//!
//! Three views exist per storage source: the full list (backing the hidden
//! check) and the `inaccessible` / `disable_download` mode subsets. Entries
//! are invalidated as a group whenever that source's rule set changes;
//! reads repopulate lazily.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use fileshelf_core::types::DbId;
use fileshelf_db::models::filter_rule::{FilterRule, RuleMode};

/// Which cached view of a source's rules a read wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleScope {
    /// Every rule regardless of mode.
    All,
    /// Only rules of one mode.
    Mode(RuleMode),
}

/// Cache of rule lists keyed by `(storage_source_id, scope)`.
///
/// Lists are stored behind `Arc` so concurrent readers share one
/// allocation. The lock is never held across an await point.
#[derive(Default)]
pub struct RuleCache {
    entries: RwLock<HashMap<(DbId, RuleScope), Arc<Vec<FilterRule>>>>,
}

impl RuleCache {
    /// Cached list for a view, if present.
    pub fn get(&self, storage_source_id: DbId, scope: RuleScope) -> Option<Arc<Vec<FilterRule>>> {
        self.entries
            .read()
            .expect("rule cache lock poisoned")
            .get(&(storage_source_id, scope))
            .cloned()
    }

    /// Store a freshly loaded list for a view.
    pub fn insert(&self, storage_source_id: DbId, scope: RuleScope, rules: Arc<Vec<FilterRule>>) {
        self.entries
            .write()
            .expect("rule cache lock poisoned")
            .insert((storage_source_id, scope), rules);
    }

    /// Drop every cached view of one storage source.
    pub fn invalidate(&self, storage_source_id: DbId) {
        self.entries
            .write()
            .expect("rule cache lock poisoned")
            .retain(|(id, _), _| *id != storage_source_id);
    }
}
