//! CRM customer accounts.
//!
//! A validated create/read/update/delete lifecycle for customer accounts,
//! layered as:
//!
//! - [`services::CustomerService`] - validation, email uniqueness, uniform
//!   [`services::Outcome`] results
//! - [`db::CustomerStore`] - persistence, implemented for `PostgreSQL`
//!   ([`db::CustomerRepository`]) and in memory ([`db::InMemoryCustomerStore`])
//!
//! Callers of the service never see raw store errors from mutating calls;
//! reads pass the store result through.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod validation;

pub use db::{CustomerRepository, CustomerStore, InMemoryCustomerStore, RepositoryError};
pub use models::{Customer, CustomerDetails};
pub use services::{CustomerService, Outcome, ServiceError};
