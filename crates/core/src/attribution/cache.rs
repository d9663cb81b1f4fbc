//! Cache-and-refresh wrapper around the artist store.
//!
//! The cache hands out immutable [`ArtistLookup`] snapshots behind an `Arc`.
//! A refresh builds a complete new snapshot off-lock and swaps the reference
//! in under a short write lock, so concurrent readers always see either the
//! old table or the new one, never a partial build. Old snapshots are freed
//! once their last reader drops them.
//!
//! Freshness is bounded two ways: a soft TTL measured with an injected
//! [`Clock`], and explicit [`invalidate`](ArtistCache::invalidate) calls
//! driven by artist change events. An invalidated snapshot is still kept as a
//! fallback for when the store is unreachable; while serving it, the store is
//! retried at most once per [`STORE_RETRY_BACKOFF_SECS`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use crate::artist::Artist;
use crate::attribution::lookup::ArtistLookup;
use crate::attribution::store::ArtistStore;
use crate::clock::{Clock, SystemClock};
use crate::config::AttributionConfig;
use crate::error::CoreError;
use crate::types::Timestamp;

/// Seconds to keep serving a fallback snapshot before retrying a failed store.
pub const STORE_RETRY_BACKOFF_SECS: i64 = 30;

#[derive(Debug, Clone)]
struct Snapshot {
    lookup: Arc<ArtistLookup>,
    loaded_at: Timestamp,
    /// Set by `invalidate`; a stale snapshot is only served as a fallback.
    stale: bool,
    /// Set when the store failed and this snapshot was served instead.
    retry_after: Option<Timestamp>,
}

/// Shared, refreshable artist lookup.
///
/// Designed to be wrapped in `Arc` and passed to every report computation.
pub struct ArtistCache<S> {
    store: S,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    current: RwLock<Option<Snapshot>>,
    /// Bumped on every invalidation so an in-flight refresh can tell that
    /// its result is already outdated.
    generation: AtomicU64,
}

impl<S: ArtistStore> ArtistCache<S> {
    /// Create a cache on the wall clock with the configured TTL.
    pub fn new(store: S, config: &AttributionConfig) -> Self {
        Self::with_clock(store, config.cache_ttl, Arc::new(SystemClock))
    }

    /// Create a cache with an explicit TTL and time source.
    pub fn with_clock(store: S, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            ttl,
            current: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Current lookup, refreshing from the store when missing, expired or
    /// invalidated.
    ///
    /// If the store fails and any earlier snapshot exists, that snapshot is
    /// served, and keeps being served without touching the store until the
    /// retry backoff elapses. Only when nothing was ever loaded does this
    /// return [`CoreError::StoreUnavailable`].
    pub async fn lookup(&self) -> Result<Arc<ArtistLookup>, CoreError> {
        if let Some(lookup) = self.fresh_snapshot() {
            return Ok(lookup);
        }
        if let Some(lookup) = self.backoff_snapshot() {
            return Ok(lookup);
        }
        self.refresh().await
    }

    /// Fetch the artist table now and swap in a new snapshot.
    pub async fn refresh(&self) -> Result<Arc<ArtistLookup>, CoreError> {
        let generation = self.generation.load(Ordering::Acquire);

        match self.store.list_artists().await {
            Ok(artists) => {
                let lookup = Arc::new(ArtistLookup::build(artists));
                let stale = self.generation.load(Ordering::Acquire) != generation;
                if stale {
                    tracing::debug!("Artist cache invalidated during refresh, result marked stale");
                }

                tracing::info!(
                    artists = lookup.artist_count(),
                    keys = lookup.key_count(),
                    collisions = lookup.collisions().len(),
                    "Artist lookup refreshed"
                );

                let snapshot = Snapshot {
                    lookup: Arc::clone(&lookup),
                    loaded_at: self.clock.now(),
                    stale,
                    retry_after: None,
                };
                *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);

                Ok(lookup)
            }
            Err(e) => match self.hold_fallback() {
                Some(lookup) => {
                    tracing::warn!(
                        error = %e,
                        artists = lookup.artist_count(),
                        retry_in_secs = STORE_RETRY_BACKOFF_SECS,
                        "Artist store unavailable, serving previous lookup"
                    );
                    Ok(lookup)
                }
                None => {
                    tracing::error!(error = %e, "Artist store unavailable and no cached lookup");
                    Err(match e {
                        CoreError::StoreUnavailable(_) => e,
                        other => CoreError::StoreUnavailable(other.to_string()),
                    })
                }
            },
        }
    }

    /// Mark the current snapshot stale so the next read refetches.
    ///
    /// Called when artist records are created, updated or deleted. Also
    /// cancels any pending retry backoff.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(snapshot) = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .as_mut()
        {
            snapshot.stale = true;
            snapshot.retry_after = None;
        }
        tracing::debug!("Artist cache invalidated");
    }

    /// Resolve one identifier through the cached lookup.
    pub async fn resolve(&self, identifier: &str) -> Result<Option<Artist>, CoreError> {
        let lookup = self.lookup().await?;
        Ok(lookup.resolve(identifier).cloned())
    }

    /// Last loaded snapshot regardless of freshness.
    pub fn snapshot(&self) -> Option<Arc<ArtistLookup>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| Arc::clone(&s.lookup))
    }

    /// Whether a read right now would be served without touching the store.
    pub fn is_fresh(&self) -> bool {
        self.fresh_snapshot().is_some()
    }

    /// Stamp the retry backoff on the current snapshot and hand it out.
    fn hold_fallback(&self) -> Option<Arc<ArtistLookup>> {
        let retry_after = self.clock.now() + chrono::Duration::seconds(STORE_RETRY_BACKOFF_SECS);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let snapshot = guard.as_mut()?;
        snapshot.retry_after = Some(retry_after);
        Some(Arc::clone(&snapshot.lookup))
    }

    fn backoff_snapshot(&self) -> Option<Arc<ArtistLookup>> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        let snapshot = guard.as_ref()?;
        let retry_after = snapshot.retry_after?;
        (self.clock.now() < retry_after).then(|| Arc::clone(&snapshot.lookup))
    }

    fn fresh_snapshot(&self) -> Option<Arc<ArtistLookup>> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        let snapshot = guard.as_ref()?;
        if snapshot.stale {
            return None;
        }
        // A clock that moved backwards counts as fresh.
        let within_ttl = (self.clock.now() - snapshot.loaded_at)
            .to_std()
            .map_or(true, |elapsed| elapsed < self.ttl);
        within_ttl.then(|| Arc::clone(&snapshot.lookup))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use tokio::sync::Notify;

    use super::*;
    use crate::artist::Platform;
    use crate::clock::ManualClock;

    /// Store whose contents and availability can be changed between calls.
    #[derive(Default)]
    struct ScriptedStore {
        artists: Mutex<Vec<Artist>>,
        failing: Mutex<bool>,
        calls: AtomicUsize,
    }

    impl ScriptedStore {
        fn with(artists: Vec<Artist>) -> Self {
            Self {
                artists: Mutex::new(artists),
                ..Self::default()
            }
        }

        fn set_artists(&self, artists: Vec<Artist>) {
            *self.artists.lock().unwrap() = artists;
        }

        fn set_failing(&self, failing: bool) {
            *self.failing.lock().unwrap() = failing;
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ArtistStore for Arc<ScriptedStore> {
        async fn list_artists(&self) -> Result<Vec<Artist>, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if *self.failing.lock().unwrap() {
                return Err(CoreError::StoreUnavailable("connection refused".into()));
            }
            Ok(self.artists.lock().unwrap().clone())
        }
    }

    fn vivi() -> Artist {
        Artist::new("Vivi", "https://x.com/vivi_llain", Platform::Twitter)
    }

    fn setup(artists: Vec<Artist>) -> (Arc<ScriptedStore>, Arc<ManualClock>, ArtistCache<Arc<ScriptedStore>>) {
        let store = Arc::new(ScriptedStore::with(artists));
        let clock = Arc::new(ManualClock::default());
        let cache = ArtistCache::with_clock(
            Arc::clone(&store),
            Duration::from_secs(300),
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        (store, clock, cache)
    }

    #[tokio::test]
    async fn loads_once_while_fresh() {
        let (store, _clock, cache) = setup(vec![vivi()]);

        let first = cache.lookup().await.unwrap();
        let second = cache.lookup().await.unwrap();

        assert_eq!(store.calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_fresh());
    }

    #[tokio::test]
    async fn refetches_after_ttl() {
        let (store, clock, cache) = setup(vec![vivi()]);
        cache.lookup().await.unwrap();

        clock.advance(chrono::Duration::seconds(299));
        cache.lookup().await.unwrap();
        assert_eq!(store.calls(), 1);

        clock.advance(chrono::Duration::seconds(1));
        assert!(!cache.is_fresh());
        cache.lookup().await.unwrap();
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let (store, _clock, cache) = setup(vec![vivi()]);
        let before = cache.lookup().await.unwrap();
        assert!(before.resolve("Genpac").is_none());

        store.set_artists(vec![
            vivi(),
            Artist::new("Genpac", "https://x.com/Genn_pacc", Platform::Twitter),
        ]);
        cache.invalidate();

        let after = cache.lookup().await.unwrap();
        assert_eq!(store.calls(), 2);
        assert!(after.resolve("Genpac").is_some());
        // Readers holding the old snapshot are unaffected.
        assert!(before.resolve("Genpac").is_none());
    }

    #[tokio::test]
    async fn invalidate_before_first_load_is_harmless() {
        let (store, _clock, cache) = setup(vec![vivi()]);
        cache.invalidate();
        cache.lookup().await.unwrap();
        cache.lookup().await.unwrap();
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn falls_back_to_stale_snapshot_on_failure() {
        let (store, _clock, cache) = setup(vec![vivi()]);
        cache.lookup().await.unwrap();

        store.set_failing(true);
        cache.invalidate();

        let lookup = cache.lookup().await.unwrap();
        assert!(lookup.resolve("vivi").is_some());
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn errors_without_any_snapshot() {
        let (store, _clock, cache) = setup(vec![vivi()]);
        store.set_failing(true);

        assert_matches!(cache.lookup().await, Err(CoreError::StoreUnavailable(_)));
        assert!(cache.snapshot().is_none());
    }

    #[tokio::test]
    async fn resolve_goes_through_cache() {
        let (store, _clock, cache) = setup(vec![vivi()]);
        let artist = cache.resolve("VIVI").await.unwrap();
        assert_eq!(artist.map(|a| a.url), Some("https://x.com/vivi_llain".to_string()));
        assert!(cache.resolve("nobody").await.unwrap().is_none());
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn empty_store_yields_empty_lookup() {
        let (_store, _clock, cache) = setup(Vec::new());
        let lookup = cache.lookup().await.unwrap();
        assert!(lookup.is_empty());
    }

    #[tokio::test]
    async fn failing_store_is_retried_after_backoff() {
        let (store, clock, cache) = setup(vec![vivi()]);
        cache.lookup().await.unwrap();

        store.set_failing(true);
        cache.invalidate();
        cache.lookup().await.unwrap();
        assert_eq!(store.calls(), 2);

        // Within the backoff the fallback is served without asking the store.
        clock.advance(chrono::Duration::seconds(STORE_RETRY_BACKOFF_SECS - 1));
        let lookup = cache.lookup().await.unwrap();
        assert!(lookup.resolve("vivi").is_some());
        assert_eq!(store.calls(), 2);
        assert!(!cache.is_fresh());

        store.set_failing(false);
        clock.advance(chrono::Duration::seconds(1));
        cache.lookup().await.unwrap();
        assert_eq!(store.calls(), 3);
        assert!(cache.is_fresh());
    }

    #[tokio::test]
    async fn invalidate_cancels_backoff() {
        let (store, _clock, cache) = setup(vec![vivi()]);
        cache.lookup().await.unwrap();

        store.set_failing(true);
        cache.invalidate();
        cache.lookup().await.unwrap();
        assert_eq!(store.calls(), 2);

        store.set_failing(false);
        cache.invalidate();
        cache.lookup().await.unwrap();
        assert_eq!(store.calls(), 3);
        assert!(cache.is_fresh());
    }

    // -----------------------------------------------------------------------
    // Invalidation racing a refresh
    // -----------------------------------------------------------------------

    /// Store whose fetch blocks until released, announcing when it starts.
    #[derive(Default)]
    struct GatedStore {
        started: Notify,
        release: Notify,
        calls: AtomicUsize,
    }

    impl ArtistStore for Arc<GatedStore> {
        async fn list_artists(&self) -> Result<Vec<Artist>, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.started.notify_one();
            self.release.notified().await;
            Ok(vec![vivi()])
        }
    }

    #[tokio::test]
    async fn invalidation_during_refresh_marks_result_stale() {
        let store = Arc::new(GatedStore::default());
        let cache = Arc::new(ArtistCache::with_clock(
            Arc::clone(&store),
            Duration::from_secs(300),
            Arc::new(ManualClock::default()),
        ));

        let loading = tokio::spawn({
            let cache = Arc::clone(&cache);
            async move { cache.lookup().await.map(|l| l.artist_count()) }
        });

        store.started.notified().await;
        cache.invalidate();
        store.release.notify_one();

        // The in-flight caller still gets its result.
        assert_eq!(loading.await.unwrap().unwrap(), 1);
        assert!(!cache.is_fresh());
        assert!(cache.snapshot().is_some());

        // The next read goes back to the store.
        store.release.notify_one();
        cache.lookup().await.unwrap();
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_fresh());
    }
}
