use p100_core::artist::Artist;
use p100_core::attribution::{normalize, ArtistCache};
use serde::Serialize;

use super::print_json;
use crate::roster::Roster;

#[derive(Debug, Serialize)]
struct Resolution<'a> {
    identifier: &'a str,
    key: String,
    artist: Option<Artist>,
}

/// Look one identifier up through the artist cache.
pub async fn run(cache: &ArtistCache<Roster>, identifier: &str, json: bool) -> anyhow::Result<()> {
    let artist = cache.resolve(identifier).await?;
    let key = normalize(identifier);

    if json {
        return print_json(&Resolution {
            identifier,
            key,
            artist,
        });
    }

    match artist {
        Some(artist) => tracing::info!(
            identifier,
            key = %key,
            name = %artist.name,
            url = %artist.url,
            platform = %artist.platform,
            "Artist resolved"
        ),
        None => tracing::warn!(identifier, key = %key, "No artist matches this identifier"),
    }
    Ok(())
}
