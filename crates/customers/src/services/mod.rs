//! Business logic over the customer store.
//!
//! The service is the only place store and validation errors are turned into
//! caller-facing results. Mutating calls return an [`Outcome`]; reads pass the
//! store result straight through.

pub mod customers;
pub mod outcome;

use core::fmt;

use thiserror::Error;

use crate::db::RepositoryError;
use crate::validation::ValidationErrors;

pub use customers::CustomerService;
pub use outcome::Outcome;

/// The store call a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "creating",
            Self::Update => "updating",
            Self::Delete => "deleting",
        })
    }
}

/// Why a mutating customer operation failed.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// One or more field rules were broken.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The email already belongs to a customer (create).
    #[error("a customer with this email already exists")]
    DuplicateEmail,

    /// The email belongs to a different customer (update).
    #[error("another customer with this email already exists")]
    EmailTakenByAnother,

    /// The customer to delete does not exist.
    #[error("customer not found")]
    NotFound,

    /// The store reported nothing to delete.
    #[error("failed to delete customer")]
    DeleteFailed,

    /// The store failed unexpectedly.
    #[error("error {operation} customer: {source}")]
    Store {
        operation: Operation,
        #[source]
        source: RepositoryError,
    },
}

impl ServiceError {
    /// Whether the referenced customer does not exist, whichever layer noticed.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound
                | Self::Store {
                    source: RepositoryError::NotFound,
                    ..
                }
        )
    }

    /// Whether the failure is an email uniqueness violation.
    #[must_use]
    pub const fn is_duplicate_email(&self) -> bool {
        matches!(self, Self::DuplicateEmail | Self::EmailTakenByAnother)
    }
}
