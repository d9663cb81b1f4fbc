use anyhow::Context;
use p100_core::artist::CharacterType;
use p100_core::attribution::diagnostics::log_report;
use p100_core::attribution::ArtworkReporter;
use p100_db::repositories::CharacterArtworkRepo;
use p100_db::DbPool;

use super::print_json;
use crate::roster::Roster;

/// Analyze one character's artwork and print or log the report.
pub async fn run(
    pool: &DbPool,
    reporter: &ArtworkReporter<Roster>,
    kind: CharacterType,
    id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let artwork = CharacterArtworkRepo::find(pool, kind, id)
        .await?
        .with_context(|| format!("No {kind} with id '{id}'"))?;

    let report = reporter.analyze(&artwork.into_report_input()).await?;

    if json {
        print_json(&report)
    } else {
        log_report(&report);
        Ok(())
    }
}
