//! Test data builders
//!
//! Builders with sensible defaults so tests only spell out the fields
//! they care about. Defaults mirror the canonical end-to-end scenario:
//! claim 1 from HOSP-001 for 1000 INR backed by document QmHash.

use core_kernel::{ClaimId, CurrencyCode, DocumentHash, HospitalId};
use domain_ledger::SubmitClaim;

/// Builder for claim submissions
pub struct SubmitClaimBuilder {
    id: ClaimId,
    hospital_id: HospitalId,
    amount_minor: i64,
    currency: CurrencyCode,
    document_hash: DocumentHash,
}

impl Default for SubmitClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitClaimBuilder {
    /// Creates a builder with the canonical defaults
    pub fn new() -> Self {
        Self {
            id: ClaimId::new(1),
            hospital_id: HospitalId::from("HOSP-001"),
            amount_minor: 1000,
            currency: CurrencyCode::from("INR"),
            document_hash: DocumentHash::from("QmHash"),
        }
    }

    /// Sets the claim id
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = ClaimId::new(id);
        self
    }

    /// Sets the hospital code
    pub fn with_hospital(mut self, hospital: impl Into<String>) -> Self {
        self.hospital_id = HospitalId::new(hospital);
        self
    }

    /// Sets the amount in minor units
    pub fn with_amount(mut self, amount_minor: i64) -> Self {
        self.amount_minor = amount_minor;
        self
    }

    /// Sets the currency code
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = CurrencyCode::new(currency);
        self
    }

    /// Sets the document hash
    pub fn with_document(mut self, hash: impl Into<String>) -> Self {
        self.document_hash = DocumentHash::new(hash);
        self
    }

    /// Builds the submission
    pub fn build(self) -> SubmitClaim {
        SubmitClaim {
            id: self.id,
            hospital_id: self.hospital_id,
            amount_minor: self.amount_minor,
            currency: self.currency,
            document_hash: self.document_hash,
        }
    }
}
