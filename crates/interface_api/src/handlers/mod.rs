//! Request handlers

pub mod claims;
pub mod events;
pub mod health;
pub mod roles;
