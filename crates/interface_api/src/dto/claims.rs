//! Claim DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_ledger::Claim;

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitClaimRequest {
    pub claim_id: u64,
    #[validate(length(min = 1, message = "hospital_id must not be empty"))]
    pub hospital_id: String,
    pub amount_minor: i64,
    #[validate(length(min = 1, message = "currency must not be empty"))]
    pub currency: String,
    #[validate(length(min = 1, message = "document_hash must not be empty"))]
    pub document_hash: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ValidateClaimRequest {
    pub approve: bool,
    #[validate(range(max = 100, message = "fraud_score must be between 0 and 100"))]
    pub fraud_score: u8,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub claim_id: u64,
    pub hospital_id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub document_hash: String,
    pub status: String,
    pub status_code: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraud_score: Option<u8>,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            claim_id: claim.id.as_u64(),
            hospital_id: claim.hospital_id.as_str().to_string(),
            amount_minor: claim.amount.minor_units(),
            currency: claim.amount.currency().as_str().to_string(),
            document_hash: claim.document_hash.as_str().to_string(),
            status: format!("{:?}", claim.status),
            status_code: claim.status.code(),
            fraud_score: claim.fraud_score,
            submitted_by: claim.submitted_by.as_str().to_string(),
            submitted_at: claim.submitted_at,
            updated_at: claim.updated_at,
        }
    }
}
