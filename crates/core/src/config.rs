use std::time::Duration;

use crate::error::CoreError;

/// Default soft expiry for the artist lookup cache.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Attribution engine configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AttributionConfig {
    /// How long a loaded artist table is served before it is refetched.
    pub cache_ttl: Duration,
}

impl AttributionConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default |
    /// |-------------------------|---------|
    /// | `ARTIST_CACHE_TTL_SECS` | `300`   |
    pub fn from_env() -> Result<Self, CoreError> {
        let cache_ttl = match std::env::var("ARTIST_CACHE_TTL_SECS") {
            Ok(raw) => parse_ttl(&raw)?,
            Err(_) => DEFAULT_CACHE_TTL,
        };

        Ok(Self { cache_ttl })
    }
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

fn parse_ttl(raw: &str) -> Result<Duration, CoreError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| {
            CoreError::Validation(format!(
                "ARTIST_CACHE_TTL_SECS must be a whole number of seconds, got '{raw}'"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ttl_is_five_minutes() {
        assert_eq!(AttributionConfig::default().cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn parse_ttl_accepts_seconds() {
        assert_eq!(parse_ttl(" 60 ").unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn parse_ttl_rejects_garbage() {
        assert!(parse_ttl("five").is_err());
    }
}
