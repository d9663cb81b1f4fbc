//! Long-running change follower.
//!
//! Wires the Postgres change listener, the event bus and the cache
//! invalidator together the way a page server would, and logs each change
//! and each reload until interrupted.

use std::sync::Arc;
use std::time::Duration;

use p100_core::attribution::ArtistCache;
use p100_db::DbPool;
use p100_events::{ArtistChangeListener, CacheInvalidator, EventBus};
use tokio::sync::broadcast;

use crate::roster::Roster;

pub async fn run(pool: &DbPool, cache: Arc<ArtistCache<Roster>>, interval: Duration) -> anyhow::Result<()> {
    // --- Event bus ---
    let bus = Arc::new(EventBus::default());
    let mut events = bus.subscribe();

    let invalidator_handle = tokio::spawn(CacheInvalidator::run(Arc::clone(&cache), bus.subscribe()));

    let listener = ArtistChangeListener::connect(pool, Arc::clone(&bus)).await?;
    let listener_handle = tokio::spawn(listener.run());

    // --- Initial load ---
    let lookup = cache.lookup().await?;
    tracing::info!(
        artists = lookup.artist_count(),
        interval_secs = interval.as_secs(),
        "Watching artist changes, press Ctrl-C to stop"
    );

    let mut ticker = tokio::time::interval(interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Interrupted, shutting down");
                break;
            }
            received = events.recv() => match received {
                Ok(event) => tracing::info!(
                    kind = event.kind.as_str(),
                    artist_id = ?event.artist_id,
                    "Artist change"
                ),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Change log lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            _ = ticker.tick() => {
                let previous = cache.snapshot();
                match cache.lookup().await {
                    Ok(lookup) if !previous.is_some_and(|p| Arc::ptr_eq(&p, &lookup)) => tracing::info!(
                        artists = lookup.artist_count(),
                        collisions = lookup.collisions().len(),
                        "Artist lookup reloaded"
                    ),
                    Ok(_) => {}
                    Err(e) => tracing::warn!(error = %e, "Artist lookup unavailable"),
                }
            }
        }
    }

    listener_handle.abort();
    invalidator_handle.abort();
    Ok(())
}
