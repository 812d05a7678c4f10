//! CRM Core - Shared types library.
//!
//! This crate provides the value types used across the CRM components:
//! - `customers` - Customer store and service layer
//! - `cli` - Command-line front end, migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access.
//! Enable the `postgres` feature to get sqlx encode/decode impls.
//!
//! # Modules
//!
//! - [`types`] - Account ID newtype plus email and phone number rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
