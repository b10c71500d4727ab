//! Persistence port for the ledger
//!
//! The ledger owns its authoritative state in memory and writes through
//! this port before applying a transition. Adapters live in the
//! infrastructure layer; the domain only sees this trait and its error
//! type, so the in-memory ledger runs without any storage attached.

use async_trait::async_trait;
use thiserror::Error;

use core_kernel::PrincipalId;

use crate::access::Role;
use crate::claim::Claim;
use crate::events::SequencedEvent;

/// Errors surfaced by a ledger store adapter
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection to the underlying store failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// A query or transaction failed
    #[error("query failed: {0}")]
    Query(String),

    /// A persisted record could not be mapped back to domain types
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Fully-loaded ledger state, produced at startup
#[derive(Debug, Default)]
pub struct LedgerSnapshot {
    /// Claims in submission order
    pub claims: Vec<Claim>,
    /// Role memberships
    pub grants: Vec<(Role, PrincipalId)>,
    /// Committed event log in sequence order
    pub events: Vec<SequencedEvent>,
}

/// Durable storage for claims, role grants, and the event log
///
/// A committed record must never be silently lost: `persist_claim`
/// stores the claim and its event atomically, and `load` must return
/// everything previously persisted.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Loads the full persisted state
    async fn load(&self) -> Result<LedgerSnapshot, StoreError>;

    /// Atomically upserts a claim and appends its transition event
    async fn persist_claim(
        &self,
        claim: &Claim,
        event: &SequencedEvent,
    ) -> Result<(), StoreError>;

    /// Records a role grant; repeat grants are a no-op
    async fn persist_grant(&self, role: Role, principal: &PrincipalId)
        -> Result<(), StoreError>;

    /// Records a role revocation; revoking a non-member is a no-op
    async fn persist_revoke(
        &self,
        role: Role,
        principal: &PrincipalId,
    ) -> Result<(), StoreError>;
}
