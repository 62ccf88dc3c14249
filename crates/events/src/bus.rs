//! Storage-source event channel backed by `tokio::sync::broadcast`.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` across the application.
//! Publishers emit [`StorageEvent`]s after the triggering database write
//! has committed; subscribers receive every event independently.

use tokio::sync::broadcast;

use fileshelf_core::types::DbId;

// ---------------------------------------------------------------------------
// StorageEvent
// ---------------------------------------------------------------------------

/// A storage-source lifecycle notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEvent {
    /// A storage source was removed. Subscribers drop dependent
    /// per-source configuration.
    SourceDeleted { id: DbId, name: String },

    /// A storage source was cloned. Subscribers copy dependent
    /// per-source configuration from `from_id` to `new_id`.
    SourceDuplicated { from_id: DbId, new_id: DbId },
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out channel for [`StorageEvent`]s.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published event.
pub struct EventBus {
    sender: broadcast::Sender<StorageEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With zero subscribers the event is silently dropped; the SendError
    /// only means there are no receivers.
    pub fn publish(&self, event: StorageEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
