//! Request handlers, grouped by resource.

pub mod filter_rules;
pub mod storage_sources;
