//! Background subscriber keeping filter rules in step with storage-source
//! lifecycle events.
//!
//! [`FilterRuleSync`] runs as a long-lived task: on `SourceDeleted` it
//! removes the source's rules (and drops the cached views), on
//! `SourceDuplicated` it copies the source's rules under the new id. The
//! loop exits when the bus sender is dropped.

use std::sync::Arc;

use tokio::sync::broadcast;

use fileshelf_events::StorageEvent;

use crate::service::FilterService;

/// Background service reacting to storage-source events.
pub struct FilterRuleSync;

impl FilterRuleSync {
    /// Run the subscription loop.
    ///
    /// Handler failures are logged and the loop continues; a missed event
    /// leaves at worst orphaned rules behind, never a wrong decision,
    /// because decisions always consult the live rule set of the id they
    /// are asked about.
    pub async fn run(filter: Arc<FilterService>, mut receiver: broadcast::Receiver<StorageEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => Self::handle(&filter, event).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Filter rule sync lagged, some events were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, filter rule sync shutting down");
                    break;
                }
            }
        }
    }

    async fn handle(filter: &FilterService, event: StorageEvent) {
        match event {
            StorageEvent::SourceDeleted { id, name } => {
                match filter.delete_by_storage_source(id).await {
                    Ok(removed) => tracing::debug!(
                        storage_source_id = id,
                        name = %name,
                        removed,
                        "Removed filter rules of deleted storage source"
                    ),
                    Err(e) => tracing::error!(
                        storage_source_id = id,
                        error = %e,
                        "Failed to remove filter rules of deleted storage source"
                    ),
                }
            }
            StorageEvent::SourceDuplicated { from_id, new_id } => {
                if let Err(e) = filter.duplicate(from_id, new_id).await {
                    tracing::error!(
                        from_id,
                        new_id,
                        error = %e,
                        "Failed to duplicate filter rules"
                    );
                }
            }
        }
    }
}
