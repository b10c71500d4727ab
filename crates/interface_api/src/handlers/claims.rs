//! Claim handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use validator::Validate;

use core_kernel::{ClaimId, CurrencyCode, DocumentHash, HospitalId};
use domain_ledger::SubmitClaim;

use crate::auth::AuthenticatedPrincipal;
use crate::dto::claims::{ClaimResponse, SubmitClaimRequest, ValidateClaimRequest};
use crate::error::ApiError;
use crate::AppState;

/// Submits a new claim
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    request.validate()?;

    let submission = SubmitClaim {
        id: ClaimId::new(request.claim_id),
        hospital_id: HospitalId::new(request.hospital_id),
        amount_minor: request.amount_minor,
        currency: CurrencyCode::new(request.currency),
        document_hash: DocumentHash::new(request.document_hash),
    };

    let claim = state.ledger.submit_claim(&principal.0, submission).await?;
    Ok(Json(claim.into()))
}

/// Lists claims in submission order
pub async fn list_claims(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.ledger.list_claims().await;
    Ok(Json(claims.into_iter().map(ClaimResponse::from).collect()))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.ledger.get_claim(ClaimId::new(id)).await?;
    Ok(Json(claim.into()))
}

/// Records the validation decision for a claim
pub async fn validate_claim(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(id): Path<u64>,
    Json(request): Json<ValidateClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    request.validate()?;

    let claim = state
        .ledger
        .validate_claim(&principal.0, ClaimId::new(id), request.approve, request.fraud_score)
        .await?;
    Ok(Json(claim.into()))
}

/// Settles an approved claim
pub async fn settle_claim(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(id): Path<u64>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state
        .ledger
        .settle_claim(&principal.0, ClaimId::new(id))
        .await?;
    Ok(Json(claim.into()))
}
