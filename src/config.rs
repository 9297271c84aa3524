// ABOUTME: Immutable application configuration loaded once from the environment
// ABOUTME: Trusted origins, database URL, bind port, and session windows

use anyhow::{bail, Context};
use chrono::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    /// Allow-listed request origins, from a comma-separated list.
    pub trusted_origins: Vec<String>,
    /// How long a newly issued session lives.
    pub session_lifetime: Duration,
    /// A session older than this (since last update) gets a background
    /// refresh on lookup.
    pub session_update_age: Duration,
    /// Sessions younger than this are served without any refresh check.
    pub session_fresh_age: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let port = std::env::var("BACKEND_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("BACKEND_PORT must be a valid port number")?;
        let trusted = std::env::var("TRUSTED_ORIGINS")
            .context("TRUSTED_ORIGINS must be set")?;

        let config = Self {
            database_url,
            port,
            ..Self::with_origins(trusted.split(',').map(str::trim).map(String::from))
        };
        if config.trusted_origins.is_empty() {
            bail!("TRUSTED_ORIGINS must contain at least one origin");
        }
        Ok(config)
    }

    /// Defaults for everything except the origin allow-list; used by
    /// `from_env` and by tests.
    pub fn with_origins(origins: impl IntoIterator<Item = String>) -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            port: 3000,
            trusted_origins: origins.into_iter().filter(|o| !o.is_empty()).collect(),
            session_lifetime: Duration::days(7),
            session_update_age: Duration::minutes(30),
            session_fresh_age: Duration::minutes(5),
        }
    }

    pub fn is_trusted_origin(&self, origin: &str) -> bool {
        self.trusted_origins.iter().any(|o| o == origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_membership() {
        let config = AppConfig::with_origins([
            "https://shop.example".to_string(),
            "https://admin.example".to_string(),
        ]);
        assert!(config.is_trusted_origin("https://shop.example"));
        assert!(!config.is_trusted_origin("https://evil.example"));
    }

    #[test]
    fn empty_entries_are_dropped() {
        let config = AppConfig::with_origins(
            "https://shop.example,,".split(',').map(String::from),
        );
        assert_eq!(config.trusted_origins.len(), 1);
    }
}
