//! Customer service: validation, email uniqueness and result shaping.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crm_core::AccountId;

use super::{Operation, Outcome, ServiceError};
use crate::db::{CustomerStore, RepositoryError};
use crate::models::{Customer, CustomerDetails};
use crate::validation::validate_customer;

const CREATED: &str = "customer created successfully";
const UPDATED: &str = "customer updated successfully";
const DELETED: &str = "customer deleted successfully";

/// Validated CRUD over a [`CustomerStore`].
///
/// Uniqueness is checked twice: here, before touching the store, and by the
/// store's unique index. A lost race on the index is reported the same way
/// as a failed pre-check.
#[derive(Debug)]
pub struct CustomerService<S: CustomerStore> {
    store: Arc<S>,
}

impl<S: CustomerStore> Clone for CustomerService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: CustomerStore> CustomerService<S> {
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All customers, newest first.
    ///
    /// # Errors
    ///
    /// Returns the store error unchanged.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let customers = self.store.list_all().await?;
        debug!(count = customers.len(), "listed customers");
        Ok(customers)
    }

    /// A single customer, if it exists.
    ///
    /// # Errors
    ///
    /// Returns the store error unchanged.
    #[instrument(skip(self), fields(account_id = %id))]
    pub async fn get_by_id(&self, id: AccountId) -> Result<Option<Customer>, RepositoryError> {
        self.store.get_by_id(id).await
    }

    /// Validate and insert a new customer.
    #[instrument(skip(self, details), fields(email = %details.email))]
    pub async fn create(&self, details: &CustomerDetails) -> Outcome<Customer> {
        if let Err(errors) = validate_customer(details) {
            info!(%errors, "rejected invalid customer");
            return ServiceError::Validation(errors).into();
        }

        match self.store.email_exists(&details.email, None).await {
            Ok(false) => {}
            Ok(true) => {
                info!("rejected duplicate email");
                return ServiceError::DuplicateEmail.into();
            }
            Err(source) => return store_failure(Operation::Create, source),
        }

        match self.store.create(details).await {
            Ok(customer) => {
                info!(account_id = %customer.account_id, "customer created");
                Outcome::success(CREATED, customer)
            }
            Err(RepositoryError::Conflict(reason)) => {
                warn!(%reason, "unique index rejected customer email");
                ServiceError::DuplicateEmail.into()
            }
            Err(source) => store_failure(Operation::Create, source),
        }
    }

    /// Validate and replace the editable fields of an existing customer.
    ///
    /// Existence is not checked up front; a missing `account_id` comes back
    /// from the store as not found. `date_created` in the input is ignored.
    #[instrument(skip(self, customer), fields(account_id = %customer.account_id))]
    pub async fn update(&self, customer: &Customer) -> Outcome<Customer> {
        if let Err(errors) = validate_customer(&customer.details) {
            info!(%errors, "rejected invalid customer");
            return ServiceError::Validation(errors).into();
        }

        match self
            .store
            .email_exists(&customer.details.email, Some(customer.account_id))
            .await
        {
            Ok(false) => {}
            Ok(true) => {
                info!("rejected email owned by another customer");
                return ServiceError::EmailTakenByAnother.into();
            }
            Err(source) => return store_failure(Operation::Update, source),
        }

        match self.store.update(customer).await {
            Ok(updated) => {
                info!("customer updated");
                Outcome::success(UPDATED, updated)
            }
            Err(RepositoryError::Conflict(reason)) => {
                warn!(%reason, "unique index rejected customer email");
                ServiceError::EmailTakenByAnother.into()
            }
            Err(source) => store_failure(Operation::Update, source),
        }
    }

    /// Delete a customer after confirming it exists.
    #[instrument(skip(self), fields(account_id = %id))]
    pub async fn delete(&self, id: AccountId) -> Outcome<()> {
        match self.store.get_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                info!("customer to delete not found");
                return ServiceError::NotFound.into();
            }
            Err(source) => return store_failure(Operation::Delete, source),
        }

        match self.store.delete(id).await {
            Ok(true) => {
                info!("customer deleted");
                Outcome::success(DELETED, ())
            }
            Ok(false) => {
                warn!("customer vanished before delete");
                ServiceError::DeleteFailed.into()
            }
            Err(source) => store_failure(Operation::Delete, source),
        }
    }
}

fn store_failure<T>(operation: Operation, source: RepositoryError) -> Outcome<T> {
    warn!(error = %source, %operation, "customer store failure");
    ServiceError::Store { operation, source }.into()
}
