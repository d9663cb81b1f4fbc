//! Bulk-insert artists from a roster file.
//!
//! Names are matched case-insensitively against the table and against
//! earlier entries in the same file; existing names are left untouched.

use std::collections::HashSet;
use std::path::Path;

use p100_db::models::artist::CreateArtist;
use p100_db::repositories::ArtistRepo;
use p100_db::DbPool;
use serde::Serialize;
use validator::Validate;

use super::print_json;
use crate::roster::read_roster_file;

/// An entry that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEntry {
    pub index: usize,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub dry_run: bool,
    pub created: Vec<String>,
    pub existing: Vec<String>,
    pub rejected: Vec<RejectedEntry>,
}

/// Split entries into valid ones and validation failures, keeping file order.
pub fn partition_valid(entries: Vec<CreateArtist>) -> (Vec<CreateArtist>, Vec<RejectedEntry>) {
    let mut valid = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        match entry.validate() {
            Ok(()) => valid.push(entry),
            Err(e) => rejected.push(RejectedEntry {
                index,
                name: entry.name,
                reason: e.to_string(),
            }),
        }
    }
    (valid, rejected)
}

pub async fn seed(pool: &DbPool, entries: Vec<CreateArtist>, dry_run: bool) -> Result<SeedSummary, sqlx::Error> {
    let (valid, rejected) = partition_valid(entries);
    let mut summary = SeedSummary {
        dry_run,
        rejected,
        ..SeedSummary::default()
    };

    let mut seen = HashSet::new();
    for entry in valid {
        let first_in_file = seen.insert(entry.name.to_lowercase());
        if !first_in_file || ArtistRepo::find_by_name(pool, &entry.name).await?.is_some() {
            summary.existing.push(entry.name);
            continue;
        }

        if !dry_run {
            let row = ArtistRepo::create(pool, &entry).await?;
            tracing::debug!(artist_id = %row.id, name = %row.name, "Artist created");
        }
        summary.created.push(entry.name);
    }

    Ok(summary)
}

pub async fn run(pool: &DbPool, file: &Path, dry_run: bool, json: bool) -> anyhow::Result<()> {
    let entries = read_roster_file(file)?;
    let summary = seed(pool, entries, dry_run).await?;

    if json {
        return print_json(&summary);
    }

    for rejected in &summary.rejected {
        tracing::warn!(
            index = rejected.index,
            name = %rejected.name,
            reason = %rejected.reason,
            "Skipping invalid roster entry"
        );
    }
    tracing::info!(
        dry_run,
        created = summary.created.len(),
        existing = summary.existing.len(),
        rejected = summary.rejected.len(),
        "Artist seeding finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use p100_core::artist::Platform;

    fn entry(name: &str, url: &str) -> CreateArtist {
        CreateArtist {
            name: name.to_string(),
            url: url.to_string(),
            platform: Platform::Twitter,
            slug: None,
        }
    }

    #[test]
    fn invalid_entries_are_rejected_with_index() {
        let (valid, rejected) = partition_valid(vec![
            entry("Davood", "https://x.com/davoodisatwat"),
            entry("", "https://x.com/empty"),
            entry("Vivi", "not a url"),
        ]);

        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].name, "Davood");
        let indexes: Vec<_> = rejected.iter().map(|r| r.index).collect();
        assert_eq!(indexes, [1, 2]);
        assert_eq!(rejected[1].name, "Vivi");
    }
}
