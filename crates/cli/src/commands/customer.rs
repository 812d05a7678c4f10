//! Customer management commands.
//!
//! # Usage
//!
//! ```bash
//! crm customer list
//! crm customer get 42
//! crm customer create --first-name Ann --last-name Lee --email ann@x.com --city Oslo
//! crm customer update 42 --email ann.lee@x.com
//! crm customer delete 42
//! ```
//!
//! Records and outcomes are printed as JSON on stdout. A rejected create,
//! update or delete still prints its outcome, then exits with status 1.

use clap::{Args, Subcommand};

use crm_core::AccountId;
use crm_customers::{Customer, CustomerDetails, CustomerService, CustomerStore, Outcome};

use super::{CommandError, print_json};

#[derive(Subcommand)]
pub enum CustomerAction {
    /// List all customers, newest first
    List,
    /// Show one customer
    Get {
        /// Account ID
        id: AccountId,
    },
    /// Create a customer
    Create(NewCustomerArgs),
    /// Change fields of an existing customer
    Update {
        /// Account ID
        id: AccountId,
        #[command(flatten)]
        changes: CustomerChangesArgs,
    },
    /// Delete a customer
    Delete {
        /// Account ID
        id: AccountId,
    },
}

/// Fields for a new customer.
#[derive(Args)]
pub struct NewCustomerArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone_number: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
}

impl From<NewCustomerArgs> for CustomerDetails {
    fn from(args: NewCustomerArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone_number: args.phone_number,
            address: args.address,
            city: args.city,
            state: args.state,
            country: args.country,
        }
    }
}

/// Fields to replace on an existing customer; omitted flags keep their value.
///
/// Pass an empty string to clear an optional field.
#[derive(Args, Default)]
pub struct CustomerChangesArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone_number: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
}

impl CustomerChangesArgs {
    /// Overlay the supplied flags onto the current record.
    #[must_use]
    pub fn apply(self, mut customer: Customer) -> Customer {
        let details = &mut customer.details;
        if let Some(v) = self.first_name {
            details.first_name = v;
        }
        if let Some(v) = self.last_name {
            details.last_name = v;
        }
        if let Some(v) = self.email {
            details.email = v;
        }
        replace_optional(&mut details.phone_number, self.phone_number);
        replace_optional(&mut details.address, self.address);
        replace_optional(&mut details.city, self.city);
        replace_optional(&mut details.state, self.state);
        replace_optional(&mut details.country, self.country);
        customer
    }
}

fn replace_optional(field: &mut Option<String>, change: Option<String>) {
    if let Some(v) = change {
        *field = if v.is_empty() { None } else { Some(v) };
    }
}

/// Run a customer command against the given service.
///
/// # Errors
///
/// Returns an error if a read fails, the customer does not exist, or the
/// service rejects the change.
pub async fn run<S: CustomerStore>(
    service: &CustomerService<S>,
    action: CustomerAction,
) -> Result<(), CommandError> {
    match action {
        CustomerAction::List => {
            let customers = service.get_all().await?;
            tracing::info!(count = customers.len(), "Listed customers");
            print_json(&customers)
        }
        CustomerAction::Get { id } => {
            let customer = service
                .get_by_id(id)
                .await?
                .ok_or(CommandError::NotFound(id))?;
            print_json(&customer)
        }
        CustomerAction::Create(args) => {
            let details = CustomerDetails::from(args);
            report(service.create(&details).await)
        }
        CustomerAction::Update { id, changes } => {
            let current = service
                .get_by_id(id)
                .await?
                .ok_or(CommandError::NotFound(id))?;
            report(service.update(&changes.apply(current)).await)
        }
        CustomerAction::Delete { id } => report(service.delete(id).await),
    }
}

/// Print an outcome and turn a failure into an error exit.
fn report<T>(outcome: Outcome<T>) -> Result<(), CommandError>
where
    Outcome<T>: serde::Serialize,
{
    print_json(&outcome)?;
    if outcome.is_success() {
        Ok(())
    } else {
        Err(CommandError::Rejected(outcome.message()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use crm_customers::InMemoryCustomerStore;

    use super::*;

    fn stored() -> Customer {
        Customer {
            account_id: AccountId::new(1),
            details: CustomerDetails {
                phone_number: Some("555-0100".to_owned()),
                city: Some("Oslo".to_owned()),
                ..CustomerDetails::new("Ann", "Lee", "ann@x.com")
            },
            date_created: Utc::now(),
        }
    }

    #[test]
    fn test_apply_keeps_omitted_fields() {
        let changes = CustomerChangesArgs {
            email: Some("ann.lee@x.com".to_owned()),
            ..CustomerChangesArgs::default()
        };

        let updated = changes.apply(stored());

        assert_eq!(updated.details.email, "ann.lee@x.com");
        assert_eq!(updated.details.first_name, "Ann");
        assert_eq!(updated.details.city.as_deref(), Some("Oslo"));
    }

    #[test]
    fn test_apply_empty_string_clears_optional() {
        let changes = CustomerChangesArgs {
            phone_number: Some(String::new()),
            ..CustomerChangesArgs::default()
        };

        let updated = changes.apply(stored());

        assert!(updated.details.phone_number.is_none());
    }

    #[tokio::test]
    async fn test_create_and_get_in_memory() {
        let service = CustomerService::new(Arc::new(InMemoryCustomerStore::new()));
        let args = NewCustomerArgs {
            first_name: "Ann".to_owned(),
            last_name: "Lee".to_owned(),
            email: "ann@x.com".to_owned(),
            phone_number: None,
            address: None,
            city: None,
            state: None,
            country: None,
        };

        run(&service, CustomerAction::Create(args)).await.unwrap();
        run(&service, CustomerAction::Get { id: AccountId::new(1) })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_customer_errors() {
        let service = CustomerService::new(Arc::new(InMemoryCustomerStore::new()));

        let err = run(
            &service,
            CustomerAction::Update {
                id: AccountId::new(9),
                changes: CustomerChangesArgs::default(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CommandError::NotFound(id) if id == AccountId::new(9)));
    }

    #[tokio::test]
    async fn test_rejected_delete_is_an_error() {
        let service = CustomerService::new(Arc::new(InMemoryCustomerStore::new()));

        let err = run(&service, CustomerAction::Delete { id: AccountId::new(3) })
            .await
            .unwrap_err();

        assert!(matches!(err, CommandError::Rejected(ref m) if m == "customer not found"));
    }
}
