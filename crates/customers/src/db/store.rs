use async_trait::async_trait;

use crm_core::AccountId;

use super::RepositoryError;
use crate::models::{Customer, CustomerDetails};

/// Persistence operations over customer records.
///
/// Implementations know nothing about field rules; the only business rule
/// they enforce is email uniqueness, reported as `RepositoryError::Conflict`.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All customers, newest `date_created` first.
    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError>;

    /// Find a customer by ID.
    async fn get_by_id(&self, id: AccountId) -> Result<Option<Customer>, RepositoryError>;

    /// Find a customer by exact email.
    async fn get_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError>;

    /// Insert a customer, assigning `account_id` and `date_created`.
    async fn create(&self, details: &CustomerDetails) -> Result<Customer, RepositoryError>;

    /// Replace the editable fields of an existing customer.
    ///
    /// The stored `date_created` is kept regardless of the input. Never
    /// inserts; a missing `account_id` is `RepositoryError::NotFound`.
    async fn update(&self, customer: &Customer) -> Result<Customer, RepositoryError>;

    /// Hard-delete a customer. Returns `false` if nothing was there.
    async fn delete(&self, id: AccountId) -> Result<bool, RepositoryError>;

    /// Whether `email` belongs to a customer other than `exclude_id`.
    async fn email_exists(
        &self,
        email: &str,
        exclude_id: Option<AccountId>,
    ) -> Result<bool, RepositoryError>;
}
