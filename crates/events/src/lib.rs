//! Fileshelf in-process notification channel.
//!
//! [`EventBus`] is a broadcast hub for [`StorageEvent`]s, the
//! storage-source lifecycle notifications that dependent subsystems
//! react to by cleaning up or copying their per-source configuration.

pub mod bus;

pub use bus::{EventBus, StorageEvent};
