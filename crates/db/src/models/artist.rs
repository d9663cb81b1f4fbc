//! Artist entity model and DTOs.

use p100_core::artist::{Artist, Platform};
use p100_core::error::CoreError;
use p100_core::types::{ArtistId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An artist row from the `artists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtistRow {
    pub id: ArtistId,
    pub name: String,
    pub url: String,
    /// Constrained to the [`Platform`] names by a CHECK constraint.
    pub platform: String,
    pub slug: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ArtistRow {
    /// Convert into the domain type, validating the platform name.
    pub fn into_artist(self) -> Result<Artist, CoreError> {
        let platform = self.platform.parse::<Platform>()?;
        Ok(Artist {
            id: self.id,
            name: self.name,
            url: self.url,
            platform,
            slug: self.slug,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        })
    }
}

/// DTO for creating a new artist.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateArtist {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(url)]
    pub url: String,
    pub platform: Platform,
    #[validate(length(min = 1, max = 200))]
    pub slug: Option<String>,
}

/// DTO for updating an existing artist. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateArtist {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    pub platform: Option<Platform>,
    #[validate(length(min = 1, max = 200))]
    pub slug: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn row(platform: &str) -> ArtistRow {
        ArtistRow {
            id: ArtistId::new_v4(),
            name: "Angelolo".to_string(),
            url: "https://x.com/angelolooTW".to_string(),
            platform: platform.to_string(),
            slug: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_artist() {
        let artist = row("twitter").into_artist().unwrap();
        assert_eq!(artist.platform, Platform::Twitter);
        assert!(artist.created_at.is_some());
    }

    #[test]
    fn unknown_platform_fails_conversion() {
        assert_matches!(row("myspace").into_artist(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn create_artist_validates_url_and_name() {
        let valid = CreateArtist {
            name: "Luds".to_string(),
            url: "https://x.com/SplendidSneb".to_string(),
            platform: Platform::Twitter,
            slug: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateArtist {
            name: String::new(),
            url: "not a url".to_string(),
            ..valid
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("url"));
    }

    #[test]
    fn create_artist_deserializes_lowercase_platform() {
        let input: CreateArtist = serde_json::from_value(serde_json::json!({
            "name": "AVA",
            "url": "https://youtube.com/@cupidbirds",
            "platform": "youtube"
        }))
        .unwrap();
        assert_eq!(input.platform, Platform::Youtube);
        assert!(input.slug.is_none());
    }
}
