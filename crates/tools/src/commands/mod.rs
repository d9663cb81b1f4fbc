//! Subcommand implementations.

pub mod check;
pub mod debug;
pub mod report;
pub mod resolve;
pub mod seed;
pub mod summary;
pub mod watch;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use p100_core::attribution::{ArtistCache, ArtworkReporter};
use p100_db::{DbPool, PgArtistStore};
use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::config::ToolsConfig;
use crate::roster::Roster;

/// Dispatch a parsed command line.
pub async fn run(cli: Cli, config: &ToolsConfig) -> anyhow::Result<()> {
    let Cli {
        json,
        artists,
        command,
    } = cli;
    let artists = artists.as_deref();

    match command {
        Command::Report { kind, id } => {
            let pool = connect(config).await?;
            let reporter = ArtworkReporter::new(open_cache(config, artists, Some(&pool)).await?);
            report::run(&pool, &reporter, kind, &id, json).await
        }
        Command::Summary { kind } => {
            let pool = connect(config).await?;
            let reporter = ArtworkReporter::new(open_cache(config, artists, Some(&pool)).await?);
            summary::run(&pool, &reporter, kind, json).await
        }
        Command::Debug { urls } => {
            let cache = open_cache(config, artists, None).await?;
            debug::run(&cache, &urls, json).await
        }
        Command::Resolve { identifier } => {
            let cache = open_cache(config, artists, None).await?;
            resolve::run(&cache, &identifier, json).await
        }
        Command::Check { sample } => {
            let roster = open_roster(config, artists, None).await?;
            check::run(&roster, sample, json).await
        }
        Command::Seed { file, dry_run } => {
            let pool = connect(config).await?;
            seed::run(&pool, &file, dry_run, json).await
        }
        Command::Watch { interval } => {
            anyhow::ensure!(
                artists.is_none(),
                "watch follows database notifications and cannot use --artists"
            );
            let pool = connect(config).await?;
            let cache = open_cache(config, None, Some(&pool)).await?;
            watch::run(&pool, cache, Duration::from_secs(interval.max(1))).await
        }
    }
}

/// Connect, verify and migrate the database.
pub async fn connect(config: &ToolsConfig) -> anyhow::Result<DbPool> {
    let database_url = config.require_database_url()?;

    let pool = p100_db::create_pool(database_url, config.max_connections).await?;
    tracing::info!(max_connections = config.max_connections, "Database connection pool created");

    p100_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    p100_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// The roster file when one was given, otherwise the `artists` table.
async fn open_roster(
    config: &ToolsConfig,
    artists: Option<&Path>,
    pool: Option<&DbPool>,
) -> anyhow::Result<Roster> {
    if let Some(path) = artists {
        return Roster::from_file(path);
    }
    let pool = match pool {
        Some(pool) => pool.clone(),
        None => connect(config).await?,
    };
    Ok(Roster::Database(PgArtistStore::new(pool)))
}

async fn open_cache(
    config: &ToolsConfig,
    artists: Option<&Path>,
    pool: Option<&DbPool>,
) -> anyhow::Result<Arc<ArtistCache<Roster>>> {
    let roster = open_roster(config, artists, pool).await?;
    Ok(Arc::new(ArtistCache::new(roster, &config.attribution)))
}

/// Pretty-print a value as JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
