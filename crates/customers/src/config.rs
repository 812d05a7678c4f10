//! CRM configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CRM_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `CRM_DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `CRM_DB_MIN_CONNECTIONS` - Idle connections kept open (default: 2)
//! - `CRM_DB_ACQUIRE_TIMEOUT_SECS` - Seconds to wait for a connection (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CRM application configuration.
#[derive(Debug, Clone)]
pub struct CrmConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
}

/// Connection pool settings.
///
/// Implements `Debug` manually to redact the connection string.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub url: SecretString,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
    /// How long to wait for a free connection
    pub acquire_timeout: Duration,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl CrmConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database URL is missing or a numeric
    /// setting does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            database: DatabaseConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Load only the error tracking settings.
    ///
    /// Used when no database is needed (in-memory runs).
    #[must_use]
    pub fn tracking_from_env() -> (Option<String>, Option<String>) {
        let _ = dotenvy::dotenv();
        (
            get_optional_env("SENTRY_DSN"),
            get_optional_env("SENTRY_ENVIRONMENT"),
        )
    }
}

impl DatabaseConfig {
    /// Load pool settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL is missing or a number is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            url: get_database_url("CRM_DATABASE_URL")?,
            max_connections: get_parsed_or_default("CRM_DB_MAX_CONNECTIONS", 10)?,
            min_connections: get_parsed_or_default("CRM_DB_MIN_CONNECTIONS", 2)?,
            acquire_timeout: Duration::from_secs(get_parsed_or_default(
                "CRM_DB_ACQUIRE_TIMEOUT_SECS",
                10,
            )?),
        })
    }

    /// Pool settings with defaults for the given URL.
    #[must_use]
    pub fn with_url(url: SecretString) -> Self {
        Self {
            url,
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable, treating empty as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Parse an environment variable, falling back to `default` when unset.
fn get_parsed_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_valid() {
        let value: u32 = parse_value("TEST_VAR", " 25 ").unwrap();
        assert_eq!(value, 25);
    }

    #[test]
    fn test_parse_value_invalid() {
        let err = parse_value::<u32>("TEST_VAR", "many").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "TEST_VAR"));
    }

    #[test]
    fn test_parsed_or_default_when_unset() {
        let value: u64 = get_parsed_or_default("CRM_TEST_SURELY_UNSET_VAR", 10).unwrap();
        assert_eq!(value, 10);
    }

    #[test]
    fn test_with_url_defaults() {
        let config = DatabaseConfig::with_url(SecretString::from("postgres://localhost/crm"));
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.acquire_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_database_config_debug_redacts_url() {
        let config =
            DatabaseConfig::with_url(SecretString::from("postgres://crm:hunter2@db/crm"));

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("[REDACTED]"));
        assert!(debug_output.contains("max_connections"));
        assert!(!debug_output.contains("hunter2"));
    }
}
