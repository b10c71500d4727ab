//! Ledger event notifications
//!
//! One event per accepted claim transition, appended in commit order.
//! The sequence number is assigned by the ledger itself, so external
//! observers can rely on it as a total order independent of wall-clock
//! time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Amount, ClaimId, HospitalId};

/// Events emitted by the claim ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClaimEvent {
    /// A claim entered the ledger in `Submitted` state
    ClaimSubmitted {
        id: ClaimId,
        hospital_id: HospitalId,
        amount: Amount,
    },

    /// A validation decision was recorded
    ClaimValidated {
        id: ClaimId,
        approved: bool,
        fraud_score: u8,
    },

    /// An approved claim was irreversibly settled
    ClaimSettled { id: ClaimId, amount: Amount },
}

impl ClaimEvent {
    /// Returns the claim this event concerns
    pub fn claim_id(&self) -> ClaimId {
        match self {
            ClaimEvent::ClaimSubmitted { id, .. } => *id,
            ClaimEvent::ClaimValidated { id, .. } => *id,
            ClaimEvent::ClaimSettled { id, .. } => *id,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            ClaimEvent::ClaimSubmitted { .. } => "ClaimSubmitted",
            ClaimEvent::ClaimValidated { .. } => "ClaimValidated",
            ClaimEvent::ClaimSettled { .. } => "ClaimSettled",
        }
    }
}

/// An event stamped with its position in the ledger's commit order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequencedEvent {
    /// Contiguous position in commit order, starting at 1
    pub sequence: u64,
    /// When the ledger recorded the commit
    pub recorded_at: DateTime<Utc>,
    /// The transition that was committed
    pub event: ClaimEvent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::CurrencyCode;

    #[test]
    fn test_event_claim_id() {
        let event = ClaimEvent::ClaimValidated {
            id: ClaimId::new(3),
            approved: true,
            fraud_score: 7,
        };
        assert_eq!(event.claim_id(), ClaimId::new(3));
        assert_eq!(event.event_type(), "ClaimValidated");
    }

    #[test]
    fn test_event_serialization() {
        let event = ClaimEvent::ClaimSubmitted {
            id: ClaimId::new(1),
            hospital_id: HospitalId::from("HOSP-001"),
            amount: Amount::new(1000, CurrencyCode::from("INR")).unwrap(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("ClaimSubmitted"));
        assert!(json.contains("HOSP-001"));

        let back: ClaimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.claim_id(), ClaimId::new(1));
    }
}
