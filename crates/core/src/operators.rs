//! Well-known permission operator names.
//!
//! These must match the `operator` values stored in the
//! `user_storage_permissions` table.

/// Holder bypasses all filter-rule evaluation for the storage source.
pub const OPERATOR_IGNORE_HIDDEN: &str = "ignore_hidden";
