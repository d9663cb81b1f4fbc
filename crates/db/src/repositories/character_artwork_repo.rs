//! Read-only access to character artwork URLs.

use p100_core::artist::CharacterType;
use sqlx::PgPool;

use crate::models::character::{CharacterArtwork, CharacterArtworkRow};

const COLUMNS: &str = "id, name, artist_urls, legacy_header_urls";

/// Reads the artwork columns of the `killers` and `survivors` tables.
pub struct CharacterArtworkRepo;

impl CharacterArtworkRepo {
    fn table(character_type: CharacterType) -> &'static str {
        match character_type {
            CharacterType::Killer => "killers",
            CharacterType::Survivor => "survivors",
        }
    }

    /// Find one character's artwork by its slug id.
    pub async fn find(
        pool: &PgPool,
        character_type: CharacterType,
        id: &str,
    ) -> Result<Option<CharacterArtwork>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE id = $1",
            Self::table(character_type)
        );
        let row = sqlx::query_as::<_, CharacterArtworkRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|r| CharacterArtwork::from_row(r, character_type)))
    }

    /// List every character of one type, ordered by name.
    pub async fn list(
        pool: &PgPool,
        character_type: CharacterType,
    ) -> Result<Vec<CharacterArtwork>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} ORDER BY name ASC",
            Self::table(character_type)
        );
        let rows = sqlx::query_as::<_, CharacterArtworkRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| CharacterArtwork::from_row(r, character_type))
            .collect())
    }
}
