//! Core Kernel - foundational value types for the claim settlement ledger
//!
//! This crate provides the fundamental building blocks used across the system:
//! - Strongly-typed identifiers for claims, principals, and hospitals
//! - Integer minor-unit monetary amounts with opaque currency codes
//! - Content-addressed document references

pub mod identifiers;
pub mod money;

pub use identifiers::{ClaimId, DocumentHash, HospitalId, PrincipalId};
pub use money::{Amount, AmountError, CurrencyCode};
