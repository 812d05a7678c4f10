//! Core types for the CRM.
//!
//! Type-safe ids, plus the field rules shared by every customer write path.

pub mod email;
pub mod id;
pub mod phone;

pub use email::EmailError;
pub use id::*;
pub use phone::PhoneError;
