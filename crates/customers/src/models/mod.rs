//! Domain models for customer accounts.

pub mod customer;

pub use customer::{Customer, CustomerDetails};
