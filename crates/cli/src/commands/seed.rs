//! Create customers listed in a YAML file.
//!
//! ```yaml
//! customers:
//!   - first_name: Ann
//!     last_name: Lee
//!     email: ann@example.com
//!     city: Oslo
//!   - first_name: Bo
//!     last_name: Ek
//!     email: bo@example.com
//! ```
//!
//! Every entry goes through the service, so invalid or duplicate entries are
//! rejected the same way as interactive creates. The outcomes are printed as
//! a JSON array in file order.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crm_customers::{CustomerDetails, CustomerService, CustomerStore};

use super::{CommandError, print_json};

/// Top-level shape of a seed file.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub customers: Vec<CustomerDetails>,
}

impl SeedFile {
    /// Parse seed YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML does not match the expected shape.
    pub fn parse(content: &str) -> Result<Self, CommandError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Seed customers from `file`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any entry
/// was rejected.
pub async fn run<S: CustomerStore>(
    service: &CustomerService<S>,
    file: &Path,
) -> Result<(), CommandError> {
    info!(path = %file.display(), "Loading seed file");

    let content = tokio::fs::read_to_string(file)
        .await
        .map_err(|source| CommandError::Io {
            path: file.display().to_string(),
            source,
        })?;
    let seed = SeedFile::parse(&content)?;
    let total = seed.customers.len();

    info!(count = total, "Parsed seed file");

    let mut outcomes = Vec::with_capacity(total);
    for (index, details) in seed.customers.iter().enumerate() {
        let outcome = service.create(details).await;
        if !outcome.is_success() {
            warn!(index, email = %details.email, reason = %outcome.message(), "Seed entry rejected");
        }
        outcomes.push(outcome);
    }

    print_json(&outcomes)?;

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        return Err(CommandError::SeedFailed { failed, total });
    }

    info!(count = total, "Seed complete");
    Ok(())
}
