//! Entry point used by page code: cached lookup + report assembly.

use std::sync::Arc;

use crate::artist::Artist;
use crate::attribution::cache::ArtistCache;
use crate::attribution::lookup::ArtistLookup;
use crate::attribution::report::{analyze, AnalyticsReport, ReportInput};
use crate::attribution::store::ArtistStore;
use crate::error::CoreError;

/// Builds attribution reports against a shared [`ArtistCache`].
///
/// Cheap to clone; every clone shares the same cache.
pub struct ArtworkReporter<S> {
    cache: Arc<ArtistCache<S>>,
}

impl<S> Clone for ArtworkReporter<S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<S: ArtistStore> ArtworkReporter<S> {
    pub fn new(cache: Arc<ArtistCache<S>>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<ArtistCache<S>> {
        &self.cache
    }

    /// Analyze a character's artwork.
    ///
    /// Fails only with [`CoreError::StoreUnavailable`], when the store cannot
    /// be read and no earlier lookup is cached.
    pub async fn analyze(&self, input: &ReportInput) -> Result<AnalyticsReport, CoreError> {
        let lookup = self.cache.lookup().await?;
        Ok(analyze(&lookup, input))
    }

    /// Analyze a character's artwork, never failing.
    ///
    /// When the store is unreachable and nothing is cached, every artwork is
    /// reported unattributed so the page still renders.
    pub async fn analyze_or_unattributed(&self, input: &ReportInput) -> AnalyticsReport {
        match self.cache.lookup().await {
            Ok(lookup) => analyze(&lookup, input),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    character_id = %input.character_id,
                    "Rendering artwork without attribution"
                );
                analyze(&ArtistLookup::empty(), input)
            }
        }
    }

    /// Ad-hoc lookup of a single identifier outside the report flow.
    pub async fn resolve(&self, identifier: &str) -> Result<Option<Artist>, CoreError> {
        self.cache.resolve(identifier).await
    }
}
