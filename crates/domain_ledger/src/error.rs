//! Ledger error taxonomy
//!
//! Every error is caller-facing and synchronous: a failed call leaves
//! ledger state byte-for-byte unchanged and is never retried internally.

use thiserror::Error;

use core_kernel::{ClaimId, PrincipalId};

use crate::access::Role;
use crate::claim::ClaimStatus;
use crate::ports::StoreError;

/// Errors returned by ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Caller lacks the required capability
    #[error("principal '{principal}' lacks the {role} role")]
    Unauthorized {
        principal: PrincipalId,
        role: Role,
    },

    /// Identifier collision on submission
    #[error("claim {0} already exists")]
    DuplicateClaim(ClaimId),

    /// Non-positive amount on submission
    #[error("amount must be greater than zero, got {0}")]
    InvalidAmount(i64),

    /// Fraud score outside the 0-100 scale
    #[error("fraud score {0} is outside the 0-100 scale")]
    InvalidFraudScore(u8),

    /// Operation on an unknown claim
    #[error("claim {0} not found")]
    ClaimNotFound(ClaimId),

    /// Operation attempted from a state that does not permit it
    #[error("claim {id} is {status:?}: {reason}")]
    InvalidState {
        id: ClaimId,
        status: ClaimStatus,
        reason: &'static str,
    },

    /// The durable store rejected a write or failed to load
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
