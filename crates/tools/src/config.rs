use anyhow::Context;
use p100_core::config::AttributionConfig;
use p100_db::DEFAULT_MAX_CONNECTIONS;

/// Tool configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ToolsConfig {
    /// Postgres connection string. Only commands that touch the database
    /// require it.
    pub database_url: Option<String>,
    /// Pool size (default: `5`).
    pub max_connections: u32,
    pub attribution: AttributionConfig,
}

impl ToolsConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default  |
    /// |-------------------------|----------|
    /// | `DATABASE_URL`          | (unset)  |
    /// | `DB_MAX_CONNECTIONS`    | `5`      |
    /// | `ARTIST_CACHE_TTL_SECS` | `300`    |
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let max_connections = match std::env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => parse_max_connections(&raw)?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let attribution = AttributionConfig::from_env()?;

        Ok(Self {
            database_url,
            max_connections,
            attribution,
        })
    }

    pub fn require_database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set for this command")
    }
}

fn parse_max_connections(raw: &str) -> anyhow::Result<u32> {
    let value: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("DB_MAX_CONNECTIONS must be a positive integer, got '{raw}'"))?;
    anyhow::ensure!(value > 0, "DB_MAX_CONNECTIONS must be at least 1");
    Ok(value)
}
