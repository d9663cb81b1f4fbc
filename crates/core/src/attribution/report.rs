//! Per-character artwork attribution report.
//!
//! Pure logic: the caller supplies the lookup snapshot and the character's
//! artwork URLs; nothing here touches the store.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::artist::{Artist, CharacterType, Platform};
use crate::attribution::extractor::extract_identifier;
use crate::attribution::lookup::ArtistLookup;
use crate::attribution::normalize::normalize;

/// Filename marker of the perks overview image, which is never artwork.
pub const PERKS_IMAGE_MARKER: &str = "PERKS.PNG";

/// Credit shown when no artist could be attributed.
pub const UNKNOWN_ARTIST: &str = "Unknown";

/// Link target used when no artist could be attributed.
pub const UNLINKED_HREF: &str = "#";

/// Where on the character page an artwork is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkRole {
    /// Main gallery artwork (`artist_urls`).
    Gallery,
    /// Older two-image header placement (`legacy_header_urls`).
    LegacyHeader,
}

/// A single artwork URL tagged with its placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkRef {
    pub url: String,
    pub role: ArtworkRole,
}

/// Everything the reporter needs about one character.
#[derive(Debug, Clone)]
pub struct ReportInput {
    pub character_id: String,
    pub character_name: String,
    pub character_type: CharacterType,
    pub artwork_urls: Vec<String>,
    /// Legacy header slots; empty slots are `None`.
    pub legacy_header_urls: Vec<Option<String>>,
}

/// Attribution outcome for one artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub artwork_url: String,
    pub role: ArtworkRole,
    pub extracted_identifier: Option<String>,
    pub artist: Option<Artist>,
    pub matched: bool,
}

impl MatchResult {
    /// Name to print under the image.
    pub fn credit_name(&self) -> &str {
        self.artist
            .as_ref()
            .map_or(UNKNOWN_ARTIST, |a| a.name.as_str())
    }

    /// Where clicking the image should lead.
    pub fn credit_href(&self) -> &str {
        self.artist
            .as_ref()
            .map_or(UNLINKED_HREF, |a| a.url.as_str())
    }
}

/// Aggregate attribution report for a character's artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsReport {
    pub character_id: String,
    pub character_name: String,
    pub character_type: CharacterType,
    pub total_artworks: usize,
    pub matched_artist_count: usize,
    pub unmatched_artist_count: usize,
    /// Matched artworks per platform. Only platforms with at least one match appear.
    pub platform_distribution: BTreeMap<Platform, usize>,
    /// One entry per retained artwork, in input order.
    pub artwork_details: Vec<MatchResult>,
    /// Distinct identifiers of unmatched artwork that look like no known
    /// artist at all; a curator signal for who still needs adding.
    pub missing_artists: Vec<String>,
}

impl AnalyticsReport {
    pub fn gallery_details(&self) -> impl Iterator<Item = &MatchResult> {
        self.details_with_role(ArtworkRole::Gallery)
    }

    pub fn legacy_header_details(&self) -> impl Iterator<Item = &MatchResult> {
        self.details_with_role(ArtworkRole::LegacyHeader)
    }

    pub fn unmatched_details(&self) -> impl Iterator<Item = &MatchResult> {
        self.artwork_details.iter().filter(|d| !d.matched)
    }

    /// Matched share in percent, `None` when there is no artwork.
    pub fn match_rate(&self) -> Option<f64> {
        (self.total_artworks > 0)
            .then(|| self.matched_artist_count as f64 * 100.0 / self.total_artworks as f64)
    }

    fn details_with_role(&self, role: ArtworkRole) -> impl Iterator<Item = &MatchResult> {
        self.artwork_details.iter().filter(move |d| d.role == role)
    }
}

/// Whether a URL points at the perks overview image.
pub fn is_perks_image(url: &str) -> bool {
    let filename = url.rsplit('/').next().unwrap_or(url);
    filename.to_uppercase().contains(PERKS_IMAGE_MARKER)
}

/// Merge gallery and legacy header URLs into one ordered artwork list.
///
/// Drops empty slots, blank strings and perks images.
pub fn collect_artworks(input: &ReportInput) -> Vec<ArtworkRef> {
    let gallery = input
        .artwork_urls
        .iter()
        .map(|url| (url.as_str(), ArtworkRole::Gallery));
    let legacy = input
        .legacy_header_urls
        .iter()
        .flatten()
        .map(|url| (url.as_str(), ArtworkRole::LegacyHeader));

    gallery
        .chain(legacy)
        .filter(|(url, _)| !url.trim().is_empty() && !is_perks_image(url))
        .map(|(url, role)| ArtworkRef {
            url: url.to_string(),
            role,
        })
        .collect()
}

/// Extract and resolve a single artwork.
pub fn attribute(lookup: &ArtistLookup, artwork: &ArtworkRef) -> MatchResult {
    let extracted_identifier = extract_identifier(&artwork.url);
    let artist = extracted_identifier
        .as_deref()
        .and_then(|id| lookup.resolve(id))
        .cloned();

    MatchResult {
        artwork_url: artwork.url.clone(),
        role: artwork.role,
        extracted_identifier,
        matched: artist.is_some(),
        artist,
    }
}

/// Build the attribution report for one character against a lookup snapshot.
pub fn analyze(lookup: &ArtistLookup, input: &ReportInput) -> AnalyticsReport {
    let artwork_details: Vec<MatchResult> = collect_artworks(input)
        .iter()
        .map(|artwork| attribute(lookup, artwork))
        .collect();

    let mut platform_distribution = BTreeMap::new();
    for artist in artwork_details.iter().filter_map(|d| d.artist.as_ref()) {
        *platform_distribution.entry(artist.platform).or_insert(0) += 1;
    }

    let matched_artist_count = artwork_details.iter().filter(|d| d.matched).count();

    AnalyticsReport {
        character_id: input.character_id.clone(),
        character_name: input.character_name.clone(),
        character_type: input.character_type,
        total_artworks: artwork_details.len(),
        matched_artist_count,
        unmatched_artist_count: artwork_details.len() - matched_artist_count,
        platform_distribution,
        missing_artists: missing_artists(lookup, &artwork_details),
        artwork_details,
    }
}

/// Distinct unmatched identifiers with no related key in the lookup.
///
/// Deduplicated on the normalized form; the first spelling seen is kept.
fn missing_artists(lookup: &ArtistLookup, details: &[MatchResult]) -> Vec<String> {
    let mut seen = HashSet::new();
    details
        .iter()
        .filter(|d| !d.matched)
        .filter_map(|d| d.extracted_identifier.as_deref())
        .filter(|identifier| {
            let key = normalize(identifier);
            !key.is_empty() && !lookup.has_related_key(&key) && seen.insert(key)
        })
        .map(str::to_string)
        .collect()
}
