use p100_core::artist::Artist;
use p100_core::attribution::diagnostics::log_extraction_trace;
use p100_core::attribution::{extract, normalize, ArtistCache, ArtistLookup, Extraction};
use serde::Serialize;

use super::print_json;
use crate::roster::Roster;

/// Every step of attributing one URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlTrace {
    pub url: String,
    pub extraction: Option<Extraction>,
    pub key: Option<String>,
    pub artist: Option<Artist>,
}

pub fn trace(url: &str, lookup: &ArtistLookup) -> UrlTrace {
    let extraction = extract(url);
    let key = extraction.as_ref().map(|e| normalize(&e.identifier));
    let artist = key.as_deref().and_then(|k| lookup.get(k)).cloned();
    UrlTrace {
        url: url.to_string(),
        extraction,
        key,
        artist,
    }
}

pub async fn run(cache: &ArtistCache<Roster>, urls: &[String], json: bool) -> anyhow::Result<()> {
    let lookup = cache.lookup().await?;

    if json {
        let traces: Vec<UrlTrace> = urls.iter().map(|url| trace(url, &lookup)).collect();
        return print_json(&traces);
    }

    tracing::info!(
        artists = lookup.artist_count(),
        keys = lookup.key_count(),
        "Tracing artwork URLs"
    );
    for url in urls {
        log_extraction_trace(url, &lookup);
    }
    Ok(())
}
