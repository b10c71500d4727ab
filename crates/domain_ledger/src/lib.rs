//! Claim Settlement Ledger Domain
//!
//! This crate implements the authoritative record of hospital insurance
//! claims: submission, validation against an externally-computed fraud
//! score, and irreversible settlement.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Submitted -> Approved -> Settled
//!           \-> Rejected
//! ```
//!
//! Validation and the approve/reject decision commit as a single atomic
//! operation, so no claim ever rests in the intermediate `Validated`
//! state. Every accepted transition appends exactly one ordered event to
//! the ledger's notification log.

pub mod access;
pub mod claim;
pub mod error;
pub mod events;
pub mod ledger;
pub mod notifier;
pub mod ports;

pub use access::{Role, RoleRegistry};
pub use claim::{Claim, ClaimStatus, MAX_FRAUD_SCORE};
pub use error::LedgerError;
pub use events::{ClaimEvent, SequencedEvent};
pub use ledger::{ClaimLedger, LedgerConfig, SubmitClaim, DEFAULT_FRAUD_THRESHOLD};
pub use notifier::EventNotifier;
pub use ports::{LedgerSnapshot, LedgerStore, StoreError};
