//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create/save DTO for inserts

pub mod filter_rule;
pub mod storage_source;
pub mod user_permission;
