//! Access control registry
//!
//! Two overlapping capability sets keyed by principal identity:
//! administrators grant and revoke roles, validators assess and settle
//! claims. The check is a runtime predicate over the caller's identity,
//! invoked at the top of each privileged ledger operation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use core_kernel::PrincipalId;

/// Capability a principal may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May grant and revoke roles
    Administrator,
    /// May validate and settle claims
    Validator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Validator => "validator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "administrator" => Ok(Role::Administrator),
            "validator" => Ok(Role::Validator),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Registry of role memberships
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    administrators: HashSet<PrincipalId>,
    validators: HashSet<PrincipalId>,
}

impl RoleRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the bootstrap principal holding both roles
    pub fn bootstrap(principal: PrincipalId) -> Self {
        let mut registry = Self::new();
        registry.grant(Role::Administrator, principal.clone());
        registry.grant(Role::Validator, principal);
        registry
    }

    /// Checks whether a principal holds a role
    pub fn has_role(&self, role: Role, principal: &PrincipalId) -> bool {
        self.set(role).contains(principal)
    }

    /// Adds a principal to a role set; returns false if already a member
    pub fn grant(&mut self, role: Role, principal: PrincipalId) -> bool {
        self.set_mut(role).insert(principal)
    }

    /// Removes a principal from a role set; returns false if not a member
    pub fn revoke(&mut self, role: Role, principal: &PrincipalId) -> bool {
        self.set_mut(role).remove(principal)
    }

    /// True when no principal holds any role
    pub fn is_empty(&self) -> bool {
        self.administrators.is_empty() && self.validators.is_empty()
    }

    /// Iterates the members of a role set
    pub fn members(&self, role: Role) -> impl Iterator<Item = &PrincipalId> {
        self.set(role).iter()
    }

    fn set(&self, role: Role) -> &HashSet<PrincipalId> {
        match role {
            Role::Administrator => &self.administrators,
            Role::Validator => &self.validators,
        }
    }

    fn set_mut(&mut self, role: Role) -> &mut HashSet<PrincipalId> {
        match role {
            Role::Administrator => &mut self.administrators,
            Role::Validator => &mut self.validators,
        }
    }
}
