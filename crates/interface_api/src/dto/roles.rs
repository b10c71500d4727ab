//! Role DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct GrantRoleRequest {
    #[validate(length(min = 1, message = "principal must not be empty"))]
    pub principal: String,
}

#[derive(Debug, Serialize)]
pub struct RoleMembershipResponse {
    pub role: String,
    pub principal: String,
    pub member: bool,
}
