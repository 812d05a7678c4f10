//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! crm migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CRM_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Bundled from `crates/customers/migrations/` at compile time.

use crm_customers::config::CrmConfig;
use crm_customers::db;

use super::CommandError;

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if configuration is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let config = CrmConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database).await?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
