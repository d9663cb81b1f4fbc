use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use p100_tools::cli::Cli;
use p100_tools::commands;
use p100_tools::config::ToolsConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // Logs go to stderr so `--json` output on stdout stays parseable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "p100_tools=info,p100_core=info,p100_events=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // --- Configuration ---
    let config = ToolsConfig::from_env()?;
    tracing::info!(
        cache_ttl_secs = config.attribution.cache_ttl.as_secs(),
        database = config.database_url.is_some(),
        "Loaded configuration"
    );

    commands::run(cli, &config).await
}
