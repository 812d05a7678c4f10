//! CLI command implementations.

pub mod customer;
pub mod migrate;
pub mod seed;

use serde::Serialize;
use thiserror::Error;

use crm_core::AccountId;
use crm_customers::RepositoryError;
use crm_customers::config::ConfigError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A read from the store failed.
    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),

    /// The requested customer does not exist.
    #[error("Customer {0} not found")]
    NotFound(AccountId),

    /// The service rejected the request; the outcome was already printed.
    #[error("{0}")]
    Rejected(String),

    /// A seed file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A seed file is not valid YAML for the expected shape.
    #[error("Invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Output could not be rendered.
    #[error("Failed to render output: {0}")]
    Json(#[from] serde_json::Error),

    /// Some seed entries were rejected.
    #[error("{failed} of {total} customers failed to seed")]
    SeedFailed { failed: usize, total: usize },
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CommandError> {
    let rendered = serde_json::to_string_pretty(value)?;
    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }
    Ok(())
}
