//! Where the tools read artist records from.
//!
//! A roster file is a JSON array of artist entries, the same shape the
//! `seed` command inserts:
//!
//! ```json
//! [{ "name": "Davood", "url": "https://x.com/davoodisatwat", "platform": "twitter" }]
//! ```

use std::path::Path;

use anyhow::Context;
use p100_core::artist::Artist;
use p100_core::attribution::{ArtistStore, StaticArtistStore};
use p100_core::error::CoreError;
use p100_db::models::artist::CreateArtist;
use p100_db::PgArtistStore;
use validator::Validate;

/// Artist source selected on the command line.
#[derive(Clone)]
pub enum Roster {
    /// Loaded once from a roster file.
    File(StaticArtistStore),
    Database(PgArtistStore),
}

impl Roster {
    /// Load a roster file. Every entry must validate.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let entries = read_roster_file(path)?;
        for (index, entry) in entries.iter().enumerate() {
            entry
                .validate()
                .with_context(|| format!("Invalid roster entry #{index} ('{}')", entry.name))?;
        }
        let artists: Vec<Artist> = entries.into_iter().map(to_artist).collect();
        tracing::info!(path = %path.display(), artists = artists.len(), "Loaded artist roster file");
        Ok(Self::File(StaticArtistStore::new(artists)))
    }
}

impl ArtistStore for Roster {
    async fn list_artists(&self) -> Result<Vec<Artist>, CoreError> {
        match self {
            Self::File(store) => store.list_artists().await,
            Self::Database(store) => store.list_artists().await,
        }
    }
}

/// Read and parse a roster file without validating entries.
pub fn read_roster_file(path: &Path) -> anyhow::Result<Vec<CreateArtist>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file {}", path.display()))?;
    parse_roster(&raw).with_context(|| format!("Failed to parse roster file {}", path.display()))
}

pub fn parse_roster(raw: &str) -> anyhow::Result<Vec<CreateArtist>> {
    Ok(serde_json::from_str(raw)?)
}

/// In-memory artist for a roster entry.
pub fn to_artist(entry: CreateArtist) -> Artist {
    let artist = Artist::new(entry.name, entry.url, entry.platform);
    match entry.slug {
        Some(slug) => artist.with_slug(slug),
        None => artist,
    }
}
