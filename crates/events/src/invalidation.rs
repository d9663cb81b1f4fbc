//! Cache invalidation service.
//!
//! [`CacheInvalidator`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and marks the shared [`ArtistCache`] stale whenever artist records change.
//! It runs as a long-lived background task and shuts down when the bus is
//! dropped.

use std::sync::Arc;

use p100_core::attribution::{ArtistCache, ArtistStore};
use tokio::sync::broadcast;

use crate::bus::ArtistEvent;

/// Background service that keeps an [`ArtistCache`] in step with the store.
pub struct CacheInvalidator;

impl CacheInvalidator {
    /// Run the invalidation loop.
    ///
    /// Every event invalidates the cache; the next lookup refetches. A lagged
    /// receiver also invalidates, since the skipped events are unknown.
    pub async fn run<S: ArtistStore>(
        cache: Arc<ArtistCache<S>>,
        mut receiver: broadcast::Receiver<ArtistEvent>,
    ) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    tracing::debug!(
                        kind = event.kind.as_str(),
                        artist_id = ?event.artist_id,
                        "Invalidating artist cache"
                    );
                    cache.invalidate();
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Cache invalidator lagged, invalidating");
                    cache.invalidate();
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, cache invalidator shutting down");
                    break;
                }
            }
        }
    }
}
