//! Claim record and lifecycle state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Amount, ClaimId, DocumentHash, HospitalId, PrincipalId};

use crate::error::LedgerError;

/// Upper bound of the fraud score scale
pub const MAX_FRAUD_SCORE: u8 = 100;

/// Claim lifecycle status
///
/// The numeric codes are part of the wire contract consumed by the
/// dashboard and indexer. `Validated` keeps its slot in the enumeration
/// but is never an observable resting state: validation and the
/// approve/reject decision commit as one operation, so a claim moves
/// from `Submitted` straight to `Approved` or `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimStatus {
    Submitted,
    Validated,
    Approved,
    Rejected,
    Settled,
}

impl ClaimStatus {
    /// Numeric status code
    pub fn code(&self) -> u8 {
        match self {
            ClaimStatus::Submitted => 0,
            ClaimStatus::Validated => 1,
            ClaimStatus::Approved => 2,
            ClaimStatus::Rejected => 3,
            ClaimStatus::Settled => 4,
        }
    }

    /// Reconstructs a status from its numeric code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ClaimStatus::Submitted),
            1 => Some(ClaimStatus::Validated),
            2 => Some(ClaimStatus::Approved),
            3 => Some(ClaimStatus::Rejected),
            4 => Some(ClaimStatus::Settled),
            _ => None,
        }
    }

    /// True for states that permit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Rejected | ClaimStatus::Settled)
    }
}

/// A single insurance-reimbursement claim tracked by the ledger
///
/// Records are append-only: mutated at most twice after submission (the
/// validation decision, then settlement) and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Caller-chosen unique identifier
    pub id: ClaimId,
    /// Submitting facility
    pub hospital_id: HospitalId,
    /// Claimed amount in minor units, strictly positive
    pub amount: Amount,
    /// Reference to off-core stored evidence
    pub document_hash: DocumentHash,
    /// Current lifecycle status
    pub status: ClaimStatus,
    /// Externally-computed fraud score, set exactly once at validation
    pub fraud_score: Option<u8>,
    /// Principal that submitted the claim
    pub submitted_by: PrincipalId,
    /// Submission timestamp
    pub submitted_at: DateTime<Utc>,
    /// Last transition timestamp
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Creates a freshly submitted claim record
    pub fn submitted(
        id: ClaimId,
        hospital_id: HospitalId,
        amount: Amount,
        document_hash: DocumentHash,
        submitted_by: PrincipalId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            hospital_id,
            amount,
            document_hash,
            status: ClaimStatus::Submitted,
            fraud_score: None,
            submitted_by,
            submitted_at: now,
            updated_at: now,
        }
    }

    /// Applies the validation decision
    ///
    /// The claim is rejected when the validator withholds approval or the
    /// fraud score exceeds `threshold`; the score is recorded either way.
    /// Returns whether the claim was approved.
    pub fn record_decision(
        &mut self,
        approve: bool,
        fraud_score: u8,
        threshold: u8,
    ) -> Result<bool, LedgerError> {
        if self.status != ClaimStatus::Submitted {
            return Err(LedgerError::InvalidState {
                id: self.id,
                status: self.status,
                reason: "claim is not awaiting validation",
            });
        }

        let approved = approve && fraud_score <= threshold;
        self.status = if approved {
            ClaimStatus::Approved
        } else {
            ClaimStatus::Rejected
        };
        self.fraud_score = Some(fraud_score);
        self.updated_at = Utc::now();
        Ok(approved)
    }

    /// Marks an approved claim as settled; terminal and irreversible
    pub fn settle(&mut self) -> Result<(), LedgerError> {
        if self.status != ClaimStatus::Approved {
            return Err(LedgerError::InvalidState {
                id: self.id,
                status: self.status,
                reason: "claim not approved",
            });
        }
        self.status = ClaimStatus::Settled;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::CurrencyCode;

    fn test_claim() -> Claim {
        Claim::submitted(
            ClaimId::new(1),
            HospitalId::from("HOSP-001"),
            Amount::new(1000, CurrencyCode::from("INR")).unwrap(),
            DocumentHash::from("QmHash"),
            PrincipalId::from("hospital-portal"),
        )
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ClaimStatus::Submitted.code(), 0);
        assert_eq!(ClaimStatus::Validated.code(), 1);
        assert_eq!(ClaimStatus::Approved.code(), 2);
        assert_eq!(ClaimStatus::Rejected.code(), 3);
        assert_eq!(ClaimStatus::Settled.code(), 4);
    }

    #[test]
    fn test_status_code_roundtrip() {
        for code in 0..=4 {
            let status = ClaimStatus::from_code(code).unwrap();
            assert_eq!(status.code(), code);
        }
        assert!(ClaimStatus::from_code(5).is_none());
    }

    #[test]
    fn test_submitted_claim_has_no_score() {
        let claim = test_claim();
        assert_eq!(claim.status, ClaimStatus::Submitted);
        assert!(claim.fraud_score.is_none());
    }

    #[test]
    fn test_low_score_approves() {
        let mut claim = test_claim();
        let approved = claim.record_decision(true, 10, 10).unwrap();
        assert!(approved);
        assert_eq!(claim.status, ClaimStatus::Approved);
        assert_eq!(claim.fraud_score, Some(10));
    }

    #[test]
    fn test_high_score_rejects_despite_intent() {
        let mut claim = test_claim();
        let approved = claim.record_decision(true, 50, 10).unwrap();
        assert!(!approved);
        assert_eq!(claim.status, ClaimStatus::Rejected);
        assert_eq!(claim.fraud_score, Some(50));
    }

    #[test]
    fn test_withheld_approval_rejects_low_score() {
        let mut claim = test_claim();
        let approved = claim.record_decision(false, 0, 10).unwrap();
        assert!(!approved);
        assert_eq!(claim.status, ClaimStatus::Rejected);
        assert_eq!(claim.fraud_score, Some(0));
    }

    #[test]
    fn test_double_validation_fails() {
        let mut claim = test_claim();
        claim.record_decision(true, 5, 10).unwrap();
        let result = claim.record_decision(true, 5, 10);
        assert!(matches!(result, Err(LedgerError::InvalidState { .. })));
        // Score set exactly once
        assert_eq!(claim.fraud_score, Some(5));
    }

    #[test]
    fn test_settle_approved_claim() {
        let mut claim = test_claim();
        claim.record_decision(true, 5, 10).unwrap();
        claim.settle().unwrap();
        assert_eq!(claim.status, ClaimStatus::Settled);
        assert!(claim.status.is_terminal());
    }

    #[test]
    fn test_settle_requires_approved() {
        let mut submitted = test_claim();
        assert!(matches!(
            submitted.settle(),
            Err(LedgerError::InvalidState { .. })
        ));

        let mut rejected = test_claim();
        rejected.record_decision(false, 0, 10).unwrap();
        assert!(matches!(
            rejected.settle(),
            Err(LedgerError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_settle_is_terminal() {
        let mut claim = test_claim();
        claim.record_decision(true, 5, 10).unwrap();
        claim.settle().unwrap();
        assert!(matches!(
            claim.settle(),
            Err(LedgerError::InvalidState { .. })
        ));
        assert_eq!(claim.status, ClaimStatus::Settled);
    }
}
