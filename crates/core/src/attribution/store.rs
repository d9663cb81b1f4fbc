//! Read-side seam to wherever artist records live.

use std::future::Future;

use crate::artist::Artist;
use crate::error::CoreError;

/// Source of artist records for the lookup cache.
///
/// Implemented by the Postgres repository layer and by [`StaticArtistStore`]
/// for fixed rosters and tests. A failing call should surface as
/// [`CoreError::StoreUnavailable`].
pub trait ArtistStore: Send + Sync {
    /// Return every known artist.
    fn list_artists(&self) -> impl Future<Output = Result<Vec<Artist>, CoreError>> + Send;
}

/// In-memory artist roster.
#[derive(Debug, Clone, Default)]
pub struct StaticArtistStore {
    artists: Vec<Artist>,
}

impl StaticArtistStore {
    pub fn new(artists: Vec<Artist>) -> Self {
        Self { artists }
    }
}

impl ArtistStore for StaticArtistStore {
    async fn list_artists(&self) -> Result<Vec<Artist>, CoreError> {
        Ok(self.artists.clone())
    }
}
