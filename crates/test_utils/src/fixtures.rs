//! Well-known test principals and pre-seeded ledgers

use core_kernel::PrincipalId;
use domain_ledger::{ClaimLedger, LedgerConfig, Role};

/// Principals used across the test suite
pub struct Principals;

impl Principals {
    /// The bootstrap principal holding both roles
    pub fn owner() -> PrincipalId {
        PrincipalId::from("owner")
    }

    /// A principal granted validator capability by fixtures
    pub fn validator() -> PrincipalId {
        PrincipalId::from("validator-1")
    }

    /// A hospital-side caller with no privileged role
    pub fn hospital() -> PrincipalId {
        PrincipalId::from("hospital-portal")
    }

    /// A caller holding no role at all
    pub fn outsider() -> PrincipalId {
        PrincipalId::from("outsider")
    }
}

/// Creates an in-memory ledger with the default configuration, the owner
/// as bootstrap principal, and `Principals::validator()` already granted
/// validator capability
pub async fn seeded_ledger() -> ClaimLedger {
    let ledger = ClaimLedger::new(LedgerConfig::default(), Principals::owner());
    ledger
        .grant_role(&Principals::owner(), Role::Validator, Principals::validator())
        .await
        .expect("fixture grant failed");
    ledger
}
