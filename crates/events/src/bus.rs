//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] fans [`ArtistEvent`]s out to every subscriber. It is shared
//! via `Arc<EventBus>` between the change listener and whatever consumes the
//! events (the cache invalidator, the `watch` command's logger).

use chrono::{DateTime, Utc};
use p100_core::types::ArtistId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ArtistEvent
// ---------------------------------------------------------------------------

/// What happened to the artist table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtistChangeKind {
    Created,
    Updated,
    Deleted,
    /// Changes may have been missed (listener reconnected); treat the whole
    /// table as changed.
    Resync,
}

impl ArtistChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Resync => "resync",
        }
    }
}

/// A change to the artist records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistEvent {
    pub kind: ArtistChangeKind,

    /// The affected artist. `None` for [`ArtistChangeKind::Resync`].
    pub artist_id: Option<ArtistId>,

    /// When the event was observed (UTC).
    pub timestamp: DateTime<Utc>,
}

impl ArtistEvent {
    /// Create an event for a single artist row.
    pub fn new(kind: ArtistChangeKind, artist_id: ArtistId) -> Self {
        Self {
            kind,
            artist_id: Some(artist_id),
            timestamp: Utc::now(),
        }
    }

    /// Create a table-wide resync event.
    pub fn resync() -> Self {
        Self {
            kind: ArtistChangeKind::Resync,
            artist_id: None,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use p100_events::bus::{ArtistEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(ArtistEvent::resync());
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ArtistEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is dropped.
    pub fn publish(&self, event: ArtistEvent) {
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ArtistEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
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
