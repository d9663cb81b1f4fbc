//! Artist and character domain types shared by every crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{ArtistId, Timestamp};

/// Social platform hosting an artist's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Instagram,
    Youtube,
}

impl Platform {
    /// All known platforms, in display order.
    pub const ALL: [Platform; 3] = [Platform::Twitter, Platform::Instagram, Platform::Youtube];

    /// Lowercase name as stored in the `artists.platform` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Instagram => "instagram",
            Self::Youtube => "youtube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "twitter" => Ok(Self::Twitter),
            "instagram" => Ok(Self::Instagram),
            "youtube" => Ok(Self::Youtube),
            other => Err(CoreError::Validation(format!("unknown platform '{other}'"))),
        }
    }
}

/// A known content creator that artwork can be attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    /// Display name; the primary matching key.
    pub name: String,
    /// Profile link rendered under attributed artwork.
    pub url: String,
    pub platform: Platform,
    /// Optional secondary matching key.
    pub slug: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Artist {
    /// Build an artist with a fresh id and no slug or timestamps.
    pub fn new(name: impl Into<String>, url: impl Into<String>, platform: Platform) -> Self {
        Self {
            id: ArtistId::new_v4(),
            name: name.into(),
            url: url.into(),
            platform,
            slug: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Attach a secondary matching slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

/// Which roster a character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterType {
    Killer,
    Survivor,
}

impl CharacterType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Killer => "killer",
            Self::Survivor => "survivor",
        }
    }
}

impl fmt::Display for CharacterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "killer" | "killers" => Ok(Self::Killer),
            "survivor" | "survivors" => Ok(Self::Survivor),
            other => Err(CoreError::Validation(format!(
                "unknown character type '{other}'"
            ))),
        }
    }
}
