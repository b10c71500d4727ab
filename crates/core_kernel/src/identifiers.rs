//! Strongly-typed identifiers for ledger entities
//!
//! Newtype wrappers keep claim ids, principal identities, and hospital
//! codes from being mixed up in call signatures. Claim ids are chosen by
//! the submitting caller, not assigned by the ledger, so the wrapper is a
//! plain integer rather than a generated UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Caller-chosen unique claim identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(u64);

impl ClaimId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClaimId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<u64> for ClaimId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ClaimId> for u64 {
    fn from(id: ClaimId) -> u64 {
        id.0
    }
}

macro_rules! define_opaque_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, trimming surrounding whitespace
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into().trim().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

define_opaque_id!(
    PrincipalId,
    "Opaque identity of a caller (hospital account, validator, administrator)"
);
define_opaque_id!(HospitalId, "Opaque code identifying a submitting facility");
define_opaque_id!(
    DocumentHash,
    "Content-addressed reference (hash/CID) to off-core claim evidence"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_roundtrip() {
        let id = ClaimId::new(42);
        let parsed: ClaimId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_claim_id_serde_transparent() {
        let id = ClaimId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }

    #[test]
    fn test_principal_id_trims() {
        let p = PrincipalId::new("  owner  ");
        assert_eq!(p.as_str(), "owner");
    }

    #[test]
    fn test_hospital_id_display() {
        let h = HospitalId::from("HOSP-001");
        assert_eq!(h.to_string(), "HOSP-001");
    }
}
