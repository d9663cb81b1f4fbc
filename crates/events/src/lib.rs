//! Artist change propagation for the attribution cache.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ArtistEvent`]: a created/updated/deleted artist record, or a resync
//!   marker when notifications may have been missed.
//! - [`ArtistChangeListener`]: forwards Postgres `artist_changes`
//!   notifications onto the bus.
//! - [`CacheInvalidator`]: background service that invalidates an
//!   [`ArtistCache`](p100_core::attribution::ArtistCache) on every event.

pub mod bus;
pub mod invalidation;
pub mod listener;

pub use bus::{ArtistChangeKind, ArtistEvent, EventBus};
pub use invalidation::CacheInvalidator;
pub use listener::{ArtistChangeListener, ARTIST_CHANGES_CHANNEL};
