//! CRM CLI - Customer management, migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! crm migrate
//!
//! # Manage customers
//! crm customer list
//! crm customer get 42
//! crm customer create --first-name Ann --last-name Lee --email ann@x.com
//! crm customer update 42 --city Oslo
//! crm customer delete 42
//!
//! # Create customers from a YAML file
//! crm seed customers.yaml
//!
//! # Validate a seed file without a database
//! crm --in-memory seed customers.yaml
//! ```
//!
//! # Commands
//!
//! - `migrate` - Apply the bundled migrations
//! - `customer` - List, fetch, create, update and delete customers
//! - `seed` - Create customers listed in a YAML file

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crm_customers::config::CrmConfig;
use crm_customers::{CustomerRepository, CustomerService, InMemoryCustomerStore, db};

mod commands;

use commands::CommandError;
use commands::customer::CustomerAction;

#[derive(Parser)]
#[command(name = "crm")]
#[command(author, version, about = "CRM customer tools")]
struct Cli {
    /// Use a throwaway in-memory store instead of `PostgreSQL`
    #[arg(long, global = true)]
    in_memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Manage customers
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Create customers from a YAML file
    Seed {
        /// Path to the YAML file
        file: PathBuf,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(dsn: Option<&str>, environment: Option<String>) -> Option<sentry::ClientInitGuard> {
    let dsn = dsn?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: environment.map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let (sentry_dsn, sentry_environment) = CrmConfig::tracking_from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(sentry_dsn.as_deref(), sentry_environment);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "crm_customers=info,crm=info".into());

    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Migrate => {
            if cli.in_memory {
                tracing::info!("In-memory store has no schema, nothing to migrate");
                return Ok(());
            }
            commands::migrate::run().await
        }
        Commands::Customer { action } => {
            if cli.in_memory {
                commands::customer::run(&memory_service(), action).await
            } else {
                commands::customer::run(&postgres_service().await?, action).await
            }
        }
        Commands::Seed { file } => {
            if cli.in_memory {
                commands::seed::run(&memory_service(), &file).await
            } else {
                commands::seed::run(&postgres_service().await?, &file).await
            }
        }
    }
}

fn memory_service() -> CustomerService<InMemoryCustomerStore> {
    CustomerService::new(Arc::new(InMemoryCustomerStore::new()))
}

async fn postgres_service() -> Result<CustomerService<CustomerRepository>, CommandError> {
    let config = CrmConfig::from_env()?;
    let pool = db::create_pool(&config.database).await?;
    tracing::debug!("Database pool created");
    Ok(CustomerService::new(Arc::new(CustomerRepository::new(pool))))
}
