use p100_core::artist::CharacterType;
use p100_core::attribution::{AnalyticsReport, ArtworkReporter};
use p100_db::repositories::CharacterArtworkRepo;
use p100_db::DbPool;
use serde::Serialize;

use super::print_json;
use crate::roster::Roster;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSummary {
    pub id: String,
    pub name: String,
    pub total_artworks: usize,
    pub matched: usize,
    pub match_rate: Option<f64>,
    pub missing_artists: Vec<String>,
}

/// Attribution coverage across every character of one kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindSummary {
    pub character_type: CharacterType,
    pub total_artworks: usize,
    pub matched: usize,
    pub match_rate: Option<f64>,
    /// Missing identifiers across all characters, deduplicated, first seen order.
    pub missing_artists: Vec<String>,
    pub characters: Vec<CharacterSummary>,
}

pub fn summarize(character_type: CharacterType, reports: &[AnalyticsReport]) -> KindSummary {
    let characters: Vec<CharacterSummary> = reports
        .iter()
        .map(|r| CharacterSummary {
            id: r.character_id.clone(),
            name: r.character_name.clone(),
            total_artworks: r.total_artworks,
            matched: r.matched_artist_count,
            match_rate: r.match_rate(),
            missing_artists: r.missing_artists.clone(),
        })
        .collect();

    let total_artworks: usize = characters.iter().map(|c| c.total_artworks).sum();
    let matched: usize = characters.iter().map(|c| c.matched).sum();

    let mut missing_artists: Vec<String> = Vec::new();
    for name in characters.iter().flat_map(|c| &c.missing_artists) {
        if !missing_artists.contains(name) {
            missing_artists.push(name.clone());
        }
    }

    KindSummary {
        character_type,
        total_artworks,
        matched,
        match_rate: (total_artworks > 0).then(|| matched as f64 * 100.0 / total_artworks as f64),
        missing_artists,
        characters,
    }
}

pub async fn run(
    pool: &DbPool,
    reporter: &ArtworkReporter<Roster>,
    kind: CharacterType,
    json: bool,
) -> anyhow::Result<()> {
    let characters = CharacterArtworkRepo::list(pool, kind).await?;

    let mut reports = Vec::with_capacity(characters.len());
    for character in characters {
        reports.push(reporter.analyze(&character.into_report_input()).await?);
    }
    let summary = summarize(kind, &reports);

    if json {
        return print_json(&summary);
    }

    for c in &summary.characters {
        tracing::info!(
            id = %c.id,
            name = %c.name,
            total = c.total_artworks,
            matched = c.matched,
            match_rate = %c.match_rate.map_or("-".to_string(), |r| format!("{r:.2}%")),
            "Character attribution"
        );
    }
    tracing::info!(
        character_type = %kind,
        characters = summary.characters.len(),
        total = summary.total_artworks,
        matched = summary.matched,
        match_rate = %summary.match_rate.map_or("-".to_string(), |r| format!("{r:.2}%")),
        missing = summary.missing_artists.len(),
        "Attribution summary"
    );
    for name in &summary.missing_artists {
        tracing::info!(identifier = %name, "Artist missing from the artist table");
    }
    Ok(())
}
