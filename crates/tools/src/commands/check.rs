use p100_core::attribution::diagnostics::log_collisions;
use p100_core::attribution::{ArtistLookup, ArtistStore, KeyCollision};
use serde::Serialize;

use super::print_json;
use crate::roster::Roster;

/// Health of the artist table as the matcher sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCheck {
    pub artists: usize,
    pub keys: usize,
    pub collisions: Vec<KeyCollision>,
    /// First names in store order.
    pub sample: Vec<String>,
}

pub fn check(lookup: &ArtistLookup, names: &[String], sample: usize) -> TableCheck {
    TableCheck {
        artists: lookup.artist_count(),
        keys: lookup.key_count(),
        collisions: lookup.collisions().to_vec(),
        sample: names.iter().take(sample).cloned().collect(),
    }
}

pub async fn run(roster: &Roster, sample: usize, json: bool) -> anyhow::Result<()> {
    let artists = roster.list_artists().await?;
    let names: Vec<String> = artists.iter().map(|a| a.name.clone()).collect();
    let lookup = ArtistLookup::build(artists);
    let result = check(&lookup, &names, sample);

    if json {
        return print_json(&result);
    }

    if result.artists == 0 {
        tracing::warn!("Artist table is empty, nothing will be attributed");
    } else {
        tracing::info!(artists = result.artists, keys = result.keys, "Artist table loaded");
    }
    log_collisions(&lookup);
    for name in &result.sample {
        tracing::info!(name = %name, "Artist");
    }
    Ok(())
}
