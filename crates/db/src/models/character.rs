//! Character artwork columns read from the `killers` / `survivors` tables.

use p100_core::artist::CharacterType;
use p100_core::attribution::ReportInput;
use serde::Serialize;
use sqlx::FromRow;

/// The artwork-bearing columns of a character row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterArtworkRow {
    pub id: String,
    pub name: String,
    /// JSON array of URLs, or a JSON-encoded string of one on older rows.
    pub artist_urls: Option<serde_json::Value>,
    pub legacy_header_urls: Option<Vec<Option<String>>>,
}

/// A character's artwork, ready to be reported on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterArtwork {
    pub id: String,
    pub name: String,
    pub character_type: CharacterType,
    pub artist_urls: Vec<String>,
    pub legacy_header_urls: Vec<Option<String>>,
}

impl CharacterArtwork {
    pub fn from_row(row: CharacterArtworkRow, character_type: CharacterType) -> Self {
        let artist_urls = match row.artist_urls {
            Some(value) => parse_artist_urls(&row.id, value),
            None => Vec::new(),
        };
        Self {
            id: row.id,
            name: row.name,
            character_type,
            artist_urls,
            legacy_header_urls: row.legacy_header_urls.unwrap_or_default(),
        }
    }

    pub fn into_report_input(self) -> ReportInput {
        ReportInput {
            character_id: self.id,
            character_name: self.name,
            character_type: self.character_type,
            artwork_urls: self.artist_urls,
            legacy_header_urls: self.legacy_header_urls,
        }
    }
}

/// Accept either a JSON array of strings or a string holding one.
///
/// Unparseable content yields an empty list; the page then simply has no
/// gallery rather than failing.
fn parse_artist_urls(character_id: &str, value: serde_json::Value) -> Vec<String> {
    let parsed = match value {
        serde_json::Value::String(encoded) => serde_json::from_str::<Vec<Option<String>>>(&encoded),
        other => serde_json::from_value::<Vec<Option<String>>>(other),
    };

    match parsed {
        Ok(urls) => urls.into_iter().flatten().collect(),
        Err(e) => {
            tracing::warn!(
                character_id,
                error = %e,
                "Could not parse artist_urls, treating as empty"
            );
            Vec::new()
        }
    }
}
