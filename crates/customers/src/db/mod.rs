//! Database operations for customer accounts.
//!
//! # Database: `crm`
//!
//! ## Tables
//!
//! - `customers` - Customer accounts; primary key `account_id`,
//!   unique index `ix_customers_email`
//!
//! # Stores
//!
//! - [`CustomerRepository`] - `PostgreSQL`, the production store
//! - [`InMemoryCustomerStore`] - process-local store with the same key and
//!   uniqueness rules, for tests and dry runs
//!
//! # Migrations
//!
//! Migrations are stored in `crates/customers/migrations/` and run via:
//! ```bash
//! cargo run -p crm-cli -- migrate
//! ```

pub mod customers;
pub mod memory;
pub mod store;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::config::DatabaseConfig;

pub use customers::CustomerRepository;
pub use memory::InMemoryCustomerStore;
pub use store::CustomerStore;

/// Name of the unique index guarding `customers.email`.
pub const EMAIL_UNIQUE_INDEX: &str = "ix_customers_email";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("customer not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool from the configured settings.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(config.url.expose_secret())
        .await
}

/// Apply the bundled migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the history is inconsistent.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
