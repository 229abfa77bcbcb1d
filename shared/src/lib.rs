//! Shared types and validation rules for the Inventory Management System
//!
//! This crate contains the domain vocabulary shared between the backend
//! services and the test suites.

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::*;
