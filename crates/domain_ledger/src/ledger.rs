//! The claim settlement ledger service
//!
//! A single writer lock serializes every mutating operation, reproducing
//! the total order of a replicated deterministic log: validate the
//! request, write through to durable storage, apply in memory, then
//! notify. A failure at any step before the in-memory apply leaves the
//! ledger byte-for-byte unchanged and emits nothing. Reads take the read
//! guard and observe a consistent snapshot without blocking each other.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, RwLock};
use tracing::info;

use core_kernel::{Amount, ClaimId, CurrencyCode, DocumentHash, HospitalId, PrincipalId};

use crate::access::{Role, RoleRegistry};
use crate::claim::{Claim, ClaimStatus, MAX_FRAUD_SCORE};
use crate::error::LedgerError;
use crate::events::{ClaimEvent, SequencedEvent};
use crate::notifier::EventNotifier;
use crate::ports::LedgerStore;

/// Default fraud threshold: scores 0-10 pass, anything above rejects
pub const DEFAULT_FRAUD_THRESHOLD: u8 = 10;

/// Construction-time ledger configuration
///
/// The fraud threshold is fixed here rather than caller-supplied so a
/// validator cannot self-select a threshold per claim.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Fraud scores strictly above this value reject the claim
    pub fraud_threshold: u8,
    /// Broadcast buffer size for the event notifier
    pub notifier_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            fraud_threshold: DEFAULT_FRAUD_THRESHOLD,
            notifier_capacity: 256,
        }
    }
}

/// Input for `submit_claim`
#[derive(Debug, Clone)]
pub struct SubmitClaim {
    /// Caller-chosen unique identifier
    pub id: ClaimId,
    /// Submitting facility
    pub hospital_id: HospitalId,
    /// Claimed amount in minor currency units; must be strictly positive
    pub amount_minor: i64,
    /// Opaque currency code
    pub currency: CurrencyCode,
    /// Reference to off-core stored evidence
    pub document_hash: DocumentHash,
}

/// Everything behind the writer lock: the claim map, role sets, and the
/// committed event log with its sequence counter implied by length.
#[derive(Debug)]
struct LedgerState {
    claims: HashMap<ClaimId, Claim>,
    submission_order: Vec<ClaimId>,
    roles: RoleRegistry,
    events: Vec<SequencedEvent>,
}

impl LedgerState {
    fn next_sequence(&self) -> u64 {
        self.events.len() as u64 + 1
    }
}

/// The authoritative claim settlement ledger
pub struct ClaimLedger {
    state: RwLock<LedgerState>,
    store: Option<Arc<dyn LedgerStore>>,
    notifier: EventNotifier,
    config: LedgerConfig,
}

impl ClaimLedger {
    /// Creates an in-memory ledger with the bootstrap principal holding
    /// both administrator and validator roles
    pub fn new(config: LedgerConfig, bootstrap: PrincipalId) -> Self {
        let notifier = EventNotifier::new(config.notifier_capacity);
        Self {
            state: RwLock::new(LedgerState {
                claims: HashMap::new(),
                submission_order: Vec::new(),
                roles: RoleRegistry::bootstrap(bootstrap),
                events: Vec::new(),
            }),
            store: None,
            notifier,
            config,
        }
    }

    /// Restores a ledger from durable storage, attaching the store for
    /// write-through persistence of every subsequent commit
    ///
    /// When the persisted role sets are empty (first boot), the bootstrap
    /// principal is granted both roles and the grants are persisted.
    pub async fn restore(
        config: LedgerConfig,
        bootstrap: PrincipalId,
        store: Arc<dyn LedgerStore>,
    ) -> Result<Self, LedgerError> {
        let snapshot = store.load().await?;

        let mut roles = RoleRegistry::new();
        for (role, principal) in snapshot.grants {
            roles.grant(role, principal);
        }
        if roles.is_empty() {
            store.persist_grant(Role::Administrator, &bootstrap).await?;
            store.persist_grant(Role::Validator, &bootstrap).await?;
            roles = RoleRegistry::bootstrap(bootstrap);
        }

        let mut claims = HashMap::with_capacity(snapshot.claims.len());
        let mut submission_order = Vec::with_capacity(snapshot.claims.len());
        for claim in snapshot.claims {
            submission_order.push(claim.id);
            claims.insert(claim.id, claim);
        }

        info!(
            claims = claims.len(),
            events = snapshot.events.len(),
            "ledger restored from durable storage"
        );

        let notifier = EventNotifier::new(config.notifier_capacity);
        Ok(Self {
            state: RwLock::new(LedgerState {
                claims,
                submission_order,
                roles,
                events: snapshot.events,
            }),
            store: Some(store),
            notifier,
            config,
        })
    }

    /// Submits a new claim; callable by any recognized principal
    pub async fn submit_claim(
        &self,
        caller: &PrincipalId,
        submission: SubmitClaim,
    ) -> Result<Claim, LedgerError> {
        let amount = Amount::new(submission.amount_minor, submission.currency)
            .map_err(|_| LedgerError::InvalidAmount(submission.amount_minor))?;

        let mut state = self.state.write().await;
        if state.claims.contains_key(&submission.id) {
            return Err(LedgerError::DuplicateClaim(submission.id));
        }

        let claim = Claim::submitted(
            submission.id,
            submission.hospital_id,
            amount,
            submission.document_hash,
            caller.clone(),
        );
        let event = SequencedEvent {
            sequence: state.next_sequence(),
            recorded_at: Utc::now(),
            event: ClaimEvent::ClaimSubmitted {
                id: claim.id,
                hospital_id: claim.hospital_id.clone(),
                amount: claim.amount.clone(),
            },
        };

        self.persist(&claim, &event).await?;

        state.submission_order.push(claim.id);
        state.claims.insert(claim.id, claim.clone());
        state.events.push(event.clone());
        self.notifier.publish(&event);

        info!(
            claim = %claim.id,
            hospital = %claim.hospital_id,
            amount = %claim.amount,
            "claim submitted"
        );
        Ok(claim)
    }

    /// Records a validation decision on a submitted claim
    ///
    /// Validator capability required. The claim is rejected when the
    /// validator withholds approval or the fraud score exceeds the
    /// configured threshold; the score is recorded either way.
    pub async fn validate_claim(
        &self,
        caller: &PrincipalId,
        id: ClaimId,
        approve: bool,
        fraud_score: u8,
    ) -> Result<Claim, LedgerError> {
        if fraud_score > MAX_FRAUD_SCORE {
            return Err(LedgerError::InvalidFraudScore(fraud_score));
        }

        let mut state = self.state.write().await;
        self.require_role(&state.roles, Role::Validator, caller)?;

        let current = state
            .claims
            .get(&id)
            .ok_or(LedgerError::ClaimNotFound(id))?;

        let mut updated = current.clone();
        let approved =
            updated.record_decision(approve, fraud_score, self.config.fraud_threshold)?;
        let event = SequencedEvent {
            sequence: state.next_sequence(),
            recorded_at: Utc::now(),
            event: ClaimEvent::ClaimValidated {
                id,
                approved,
                fraud_score,
            },
        };

        self.persist(&updated, &event).await?;

        state.claims.insert(id, updated.clone());
        state.events.push(event.clone());
        self.notifier.publish(&event);

        info!(
            claim = %id,
            approved,
            fraud_score,
            validator = %caller,
            "claim validated"
        );
        Ok(updated)
    }

    /// Settles an approved claim; terminal and emitted exactly once
    pub async fn settle_claim(
        &self,
        caller: &PrincipalId,
        id: ClaimId,
    ) -> Result<Claim, LedgerError> {
        let mut state = self.state.write().await;
        self.require_role(&state.roles, Role::Validator, caller)?;

        let current = state
            .claims
            .get(&id)
            .ok_or(LedgerError::ClaimNotFound(id))?;

        let mut updated = current.clone();
        updated.settle()?;
        let event = SequencedEvent {
            sequence: state.next_sequence(),
            recorded_at: Utc::now(),
            event: ClaimEvent::ClaimSettled {
                id,
                amount: updated.amount.clone(),
            },
        };

        self.persist(&updated, &event).await?;

        state.claims.insert(id, updated.clone());
        state.events.push(event.clone());
        self.notifier.publish(&event);

        info!(claim = %id, amount = %updated.amount, validator = %caller, "claim settled");
        Ok(updated)
    }

    /// Returns the full record for a claim
    pub async fn get_claim(&self, id: ClaimId) -> Result<Claim, LedgerError> {
        let state = self.state.read().await;
        state
            .claims
            .get(&id)
            .cloned()
            .ok_or(LedgerError::ClaimNotFound(id))
    }

    /// Returns all claims in submission order
    pub async fn list_claims(&self) -> Vec<Claim> {
        let state = self.state.read().await;
        state
            .submission_order
            .iter()
            .filter_map(|id| state.claims.get(id).cloned())
            .collect()
    }

    /// Grants a role; administrator capability required, idempotent
    pub async fn grant_role(
        &self,
        caller: &PrincipalId,
        role: Role,
        principal: PrincipalId,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.write().await;
        self.require_role(&state.roles, Role::Administrator, caller)?;

        if state.roles.has_role(role, &principal) {
            return Ok(());
        }

        if let Some(store) = &self.store {
            store.persist_grant(role, &principal).await?;
        }
        state.roles.grant(role, principal.clone());

        info!(%principal, %role, admin = %caller, "role granted");
        Ok(())
    }

    /// Revokes a role; administrator capability required, idempotent
    pub async fn revoke_role(
        &self,
        caller: &PrincipalId,
        role: Role,
        principal: &PrincipalId,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.write().await;
        self.require_role(&state.roles, Role::Administrator, caller)?;

        if !state.roles.has_role(role, principal) {
            return Ok(());
        }

        if let Some(store) = &self.store {
            store.persist_revoke(role, principal).await?;
        }
        state.roles.revoke(role, principal);

        info!(%principal, %role, admin = %caller, "role revoked");
        Ok(())
    }

    /// Checks whether a principal holds a role; never fails
    pub async fn has_role(&self, role: Role, principal: &PrincipalId) -> bool {
        let state = self.state.read().await;
        state.roles.has_role(role, principal)
    }

    /// Returns committed events with a sequence strictly greater than
    /// `sequence`, in commit order (pass 0 for the full log)
    pub async fn events_after(&self, sequence: u64) -> Vec<SequencedEvent> {
        let state = self.state.read().await;
        state
            .events
            .iter()
            .filter(|e| e.sequence > sequence)
            .cloned()
            .collect()
    }

    /// Opens a live subscription to committed events
    pub fn subscribe(&self) -> broadcast::Receiver<SequencedEvent> {
        self.notifier.subscribe()
    }

    /// Returns the configured fraud threshold
    pub fn fraud_threshold(&self) -> u8 {
        self.config.fraud_threshold
    }

    fn require_role(
        &self,
        roles: &RoleRegistry,
        role: Role,
        caller: &PrincipalId,
    ) -> Result<(), LedgerError> {
        if roles.has_role(role, caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized {
                principal: caller.clone(),
                role,
            })
        }
    }

    async fn persist(&self, claim: &Claim, event: &SequencedEvent) -> Result<(), LedgerError> {
        if let Some(store) = &self.store {
            store.persist_claim(claim, event).await?;
        }
        Ok(())
    }
}
