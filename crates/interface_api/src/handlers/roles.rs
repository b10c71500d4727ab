//! Role administration handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use validator::Validate;

use core_kernel::PrincipalId;
use domain_ledger::Role;

use crate::auth::AuthenticatedPrincipal;
use crate::dto::roles::{GrantRoleRequest, RoleMembershipResponse};
use crate::error::ApiError;
use crate::AppState;

fn parse_role(role: &str) -> Result<Role, ApiError> {
    role.parse::<Role>().map_err(ApiError::BadRequest)
}

/// Grants a role to a principal
pub async fn grant_role(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(role): Path<String>,
    Json(request): Json<GrantRoleRequest>,
) -> Result<Json<RoleMembershipResponse>, ApiError> {
    request.validate()?;
    let role = parse_role(&role)?;
    let grantee = PrincipalId::new(request.principal);

    state
        .ledger
        .grant_role(&principal.0, role, grantee.clone())
        .await?;

    Ok(Json(RoleMembershipResponse {
        role: role.to_string(),
        principal: grantee.as_str().to_string(),
        member: true,
    }))
}

/// Revokes a role from a principal
pub async fn revoke_role(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path((role, member)): Path<(String, String)>,
) -> Result<Json<RoleMembershipResponse>, ApiError> {
    let role = parse_role(&role)?;
    let member = PrincipalId::new(member);

    state
        .ledger
        .revoke_role(&principal.0, role, &member)
        .await?;

    Ok(Json(RoleMembershipResponse {
        role: role.to_string(),
        principal: member.as_str().to_string(),
        member: false,
    }))
}

/// Reports whether a principal holds a role
pub async fn check_role(
    State(state): State<AppState>,
    Path((role, member)): Path<(String, String)>,
) -> Result<Json<RoleMembershipResponse>, ApiError> {
    let role = parse_role(&role)?;
    let member = PrincipalId::new(member);

    let holds = state.ledger.has_role(role, &member).await;

    Ok(Json(RoleMembershipResponse {
        role: role.to_string(),
        principal: member.as_str().to_string(),
        member: holds,
    }))
}
