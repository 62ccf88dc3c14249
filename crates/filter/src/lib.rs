//! Visibility/access filter rules for storage sources.
//!
//! Given a storage source and a candidate file name or path, decides
//! whether the entry is hidden, inaccessible, or blocked from download,
//! based on the source's ordered glob-rule list and a per-user bypass
//! permission.
//!
//! - [`FilterService`]: decision entry points, cached reads, and rule-set
//!   mutation (atomic replace, bulk delete, duplication).
//! - [`RuleCache`]: explicit cache-aside store keyed by
//!   `(storage_source_id, scope)`, invalidated by the mutating operations.
//! - [`FilterRuleSync`]: background subscriber that reacts to
//!   storage-source deletion/duplication events.

pub mod cache;
pub mod service;
pub mod sync;

pub use cache::{RuleCache, RuleScope};
pub use service::FilterService;
pub use sync::FilterRuleSync;
