//! Postgres-backed [`ArtistStore`] for the attribution cache.

use p100_core::artist::Artist;
use p100_core::attribution::ArtistStore;
use p100_core::error::CoreError;

use crate::repositories::ArtistRepo;
use crate::DbPool;

/// Reads artist records from the `artists` table.
#[derive(Clone)]
pub struct PgArtistStore {
    pool: DbPool,
}

impl PgArtistStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ArtistStore for PgArtistStore {
    async fn list_artists(&self) -> Result<Vec<Artist>, CoreError> {
        let rows = ArtistRepo::list(&self.pool)
            .await
            .map_err(|e| CoreError::StoreUnavailable(e.to_string()))?;

        let total = rows.len();
        let artists: Vec<Artist> = rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id;
                match row.into_artist() {
                    Ok(artist) => Some(artist),
                    Err(e) => {
                        tracing::warn!(artist_id = %id, error = %e, "Skipping artist with invalid row");
                        None
                    }
                }
            })
            .collect();

        tracing::debug!(fetched = total, usable = artists.len(), "Fetched artists from database");
        Ok(artists)
    }
}
