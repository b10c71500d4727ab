//! Test Utilities Crate
//!
//! Shared fixtures and builders for the claim settlement ledger test
//! suite.
//!
//! # Modules
//!
//! - `fixtures`: well-known principals and pre-seeded ledgers
//! - `builders`: builder patterns for test submissions

pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
