//! HTTP API Layer
//!
//! This crate provides the REST API for the claim settlement ledger
//! using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for claims, roles, and the event log
//! - **Middleware**: Authentication, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! Authentication only establishes who the caller is. Whether the caller
//! may validate, settle, or administer roles is decided by the ledger
//! itself on every call.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(ledger, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use domain_ledger::ClaimLedger;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{claims, events, health, roles};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<ClaimLedger>,
    pub config: ApiConfig,
}

/// Creates the main API router
pub fn create_router(ledger: Arc<ClaimLedger>, config: ApiConfig) -> Router {
    let state = AppState { ledger, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claim routes
    let claim_routes = Router::new()
        .route("/", post(claims::submit_claim))
        .route("/", get(claims::list_claims))
        .route("/:id", get(claims::get_claim))
        .route("/:id/validate", post(claims::validate_claim))
        .route("/:id/settle", post(claims::settle_claim));

    // Role administration routes
    let role_routes = Router::new()
        .route("/:role/members", post(roles::grant_role))
        .route("/:role/members/:principal", get(roles::check_role))
        .route("/:role/members/:principal", delete(roles::revoke_role));

    // Event log routes
    let event_routes = Router::new().route("/", get(events::list_events));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/claims", claim_routes)
        .nest("/roles", role_routes)
        .nest("/events", event_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
