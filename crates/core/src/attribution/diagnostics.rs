//! Operator-facing logging of attribution results.
//!
//! Advisory only: these functions read a report or lookup and emit `tracing`
//! events. They never change what callers render.

use crate::attribution::extractor::extract;
use crate::attribution::lookup::ArtistLookup;
use crate::attribution::normalize::normalize;
use crate::attribution::report::AnalyticsReport;

/// Log a full report, one event per line of interest.
pub fn log_report(report: &AnalyticsReport) {
    tracing::info!(
        character_id = %report.character_id,
        character_name = %report.character_name,
        character_type = %report.character_type,
        "Artwork analysis report"
    );
    tracing::info!(
        total = report.total_artworks,
        matched = report.matched_artist_count,
        unmatched = report.unmatched_artist_count,
        "Artwork totals"
    );

    if let Some(rate) = report.match_rate() {
        tracing::info!(match_rate = %format!("{rate:.2}%"), "Artist match rate");
    }

    for (platform, count) in &report.platform_distribution {
        tracing::info!(platform = %platform, count, "Matched artworks on platform");
    }

    for detail in &report.artwork_details {
        tracing::debug!(
            url = %detail.artwork_url,
            role = ?detail.role,
            identifier = detail.extracted_identifier.as_deref().unwrap_or("-"),
            artist = detail.artist.as_ref().map_or("-", |a| a.name.as_str()),
            platform = detail.artist.as_ref().map_or("-", |a| a.platform.as_str()),
            matched = detail.matched,
            "Artwork attribution"
        );
    }

    for detail in report.unmatched_details() {
        tracing::info!(url = %detail.artwork_url, "Unmatched artwork");
    }

    for name in &report.missing_artists {
        tracing::info!(identifier = %name, "Artist missing from the artist table");
    }
}

/// Trace every extraction and lookup step for one URL.
pub fn log_extraction_trace(url: &str, lookup: &ArtistLookup) {
    let Some(extraction) = extract(url) else {
        tracing::info!(url, "No artist identifier could be extracted");
        return;
    };

    let key = normalize(&extraction.identifier);
    let hit = lookup.get(&key);

    tracing::info!(
        url,
        filename = %extraction.filename,
        stem = %extraction.stem,
        pattern = extraction.pattern,
        identifier = %extraction.identifier,
        key = %key,
        hit = hit.is_some(),
        artist = hit.map_or("-", |a| a.name.as_str()),
        artist_url = hit.map_or("-", |a| a.url.as_str()),
        "Artist extraction trace"
    );
}

/// Log normalized-key collisions found while building a lookup.
pub fn log_collisions(lookup: &ArtistLookup) {
    if lookup.collisions().is_empty() {
        tracing::info!(artists = lookup.artist_count(), "No artist key collisions");
        return;
    }
    for collision in lookup.collisions() {
        tracing::warn!(
            key = %collision.key,
            shadowed = %collision.shadowed,
            winner = %collision.winner,
            "Artists share a matching key, later one wins"
        );
    }
}
