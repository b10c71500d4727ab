//! End-to-end API tests over an in-memory ledger

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use interface_api::auth::create_token;
use interface_api::config::ApiConfig;
use interface_api::create_router;
use test_utils::fixtures::{seeded_ledger, Principals};

fn test_config() -> ApiConfig {
    ApiConfig {
        jwt_secret: "test-secret".to_string(),
        ..ApiConfig::default()
    }
}

async fn test_server() -> (TestServer, ApiConfig) {
    let config = test_config();
    let ledger = Arc::new(seeded_ledger().await);
    let server = TestServer::new(create_router(ledger, config.clone())).unwrap();
    (server, config)
}

fn token_for(principal: &str, config: &ApiConfig) -> String {
    create_token(principal, &config.jwt_secret, config.jwt_expiration_secs).unwrap()
}

fn sample_submission(claim_id: u64) -> Value {
    json!({
        "claim_id": claim_id,
        "hospital_id": "HOSP-001",
        "amount_minor": 250_000,
        "currency": "INR",
        "document_hash": "QmHash",
    })
}

#[tokio::test]
async fn health_needs_no_token() {
    let (server, _) = test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn protected_routes_reject_missing_token() {
    let (server, _) = test_server().await;

    let response = server.get("/api/v1/claims").await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn protected_routes_reject_bad_token() {
    let (server, _) = test_server().await;

    let response = server
        .get("/api/v1/claims")
        .authorization_bearer("not-a-jwt")
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn claim_lifecycle_end_to_end() {
    let (server, config) = test_server().await;
    let hospital = token_for(Principals::hospital().as_str(), &config);
    let validator = token_for(Principals::validator().as_str(), &config);

    // Submit
    let response = server
        .post("/api/v1/claims")
        .authorization_bearer(&hospital)
        .json(&sample_submission(1))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "Submitted");
    assert_eq!(body["status_code"], 0);
    assert_eq!(body["submitted_by"], "hospital-portal");

    // Validate with a passing score
    let response = server
        .post("/api/v1/claims/1/validate")
        .authorization_bearer(&validator)
        .json(&json!({"approve": true, "fraud_score": 4}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "Approved");
    assert_eq!(body["fraud_score"], 4);

    // Settle
    let response = server
        .post("/api/v1/claims/1/settle")
        .authorization_bearer(&validator)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "Settled");
    assert_eq!(body["status_code"], 4);

    // The ledger recorded one event per transition, in order
    let response = server
        .get("/api/v1/events")
        .authorization_bearer(&hospital)
        .await;
    response.assert_status_ok();
    let events: Vec<Value> = response.json();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["event_type"], "ClaimSubmitted");
    assert_eq!(events[1]["event_type"], "ClaimValidated");
    assert_eq!(events[2]["event_type"], "ClaimSettled");
    assert_eq!(events[2]["sequence"], 3);

    // Catch-up cursor
    let response = server
        .get("/api/v1/events")
        .add_query_param("after", 2)
        .authorization_bearer(&hospital)
        .await;
    let events: Vec<Value> = response.json();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event_type"], "ClaimSettled");
}

#[tokio::test]
async fn duplicate_submission_conflicts() {
    let (server, config) = test_server().await;
    let hospital = token_for(Principals::hospital().as_str(), &config);

    server
        .post("/api/v1/claims")
        .authorization_bearer(&hospital)
        .json(&sample_submission(7))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/claims")
        .authorization_bearer(&hospital)
        .json(&sample_submission(7))
        .await;
    assert_eq!(response.status_code(), 409);

    let body: Value = response.json();
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn non_positive_amount_is_unprocessable() {
    let (server, config) = test_server().await;
    let hospital = token_for(Principals::hospital().as_str(), &config);

    let response = server
        .post("/api/v1/claims")
        .authorization_bearer(&hospital)
        .json(&json!({
            "claim_id": 2,
            "hospital_id": "HOSP-001",
            "amount_minor": 0,
            "currency": "INR",
            "document_hash": "QmHash",
        }))
        .await;
    assert_eq!(response.status_code(), 422);
}

#[tokio::test]
async fn validation_requires_validator_role() {
    let (server, config) = test_server().await;
    let hospital = token_for(Principals::hospital().as_str(), &config);
    let outsider = token_for(Principals::outsider().as_str(), &config);

    server
        .post("/api/v1/claims")
        .authorization_bearer(&hospital)
        .json(&sample_submission(3))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/claims/3/validate")
        .authorization_bearer(&outsider)
        .json(&json!({"approve": true, "fraud_score": 0}))
        .await;
    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn high_fraud_score_rejects_claim() {
    let (server, config) = test_server().await;
    let hospital = token_for(Principals::hospital().as_str(), &config);
    let validator = token_for(Principals::validator().as_str(), &config);

    server
        .post("/api/v1/claims")
        .authorization_bearer(&hospital)
        .json(&sample_submission(4))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/claims/4/validate")
        .authorization_bearer(&validator)
        .json(&json!({"approve": true, "fraud_score": 55}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "Rejected");

    // Rejected is terminal
    let response = server
        .post("/api/v1/claims/4/settle")
        .authorization_bearer(&validator)
        .await;
    assert_eq!(response.status_code(), 409);
}

#[tokio::test]
async fn out_of_scale_fraud_score_is_unprocessable() {
    let (server, config) = test_server().await;
    let hospital = token_for(Principals::hospital().as_str(), &config);
    let validator = token_for(Principals::validator().as_str(), &config);

    server
        .post("/api/v1/claims")
        .authorization_bearer(&hospital)
        .json(&sample_submission(5))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/claims/5/validate")
        .authorization_bearer(&validator)
        .json(&json!({"approve": true, "fraud_score": 140}))
        .await;
    assert_eq!(response.status_code(), 422);
}

#[tokio::test]
async fn unknown_claim_is_not_found() {
    let (server, config) = test_server().await;
    let hospital = token_for(Principals::hospital().as_str(), &config);

    let response = server
        .get("/api/v1/claims/999")
        .authorization_bearer(&hospital)
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn role_administration_round_trip() {
    let (server, config) = test_server().await;
    let owner = token_for(Principals::owner().as_str(), &config);

    // Grant
    let response = server
        .post("/api/v1/roles/validator/members")
        .authorization_bearer(&owner)
        .json(&json!({"principal": "auditor-2"}))
        .await;
    response.assert_status_ok();

    // Membership visible
    let response = server
        .get("/api/v1/roles/validator/members/auditor-2")
        .authorization_bearer(&owner)
        .await;
    let body: Value = response.json();
    assert_eq!(body["member"], true);

    // Revoke
    let response = server
        .delete("/api/v1/roles/validator/members/auditor-2")
        .authorization_bearer(&owner)
        .await;
    response.assert_status_ok();

    let response = server
        .get("/api/v1/roles/validator/members/auditor-2")
        .authorization_bearer(&owner)
        .await;
    let body: Value = response.json();
    assert_eq!(body["member"], false);
}

#[tokio::test]
async fn role_grants_require_administrator() {
    let (server, config) = test_server().await;
    let outsider = token_for(Principals::outsider().as_str(), &config);

    let response = server
        .post("/api/v1/roles/validator/members")
        .authorization_bearer(&outsider)
        .json(&json!({"principal": "accomplice"}))
        .await;
    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn unknown_role_is_bad_request() {
    let (server, config) = test_server().await;
    let owner = token_for(Principals::owner().as_str(), &config);

    let response = server
        .post("/api/v1/roles/wizard/members")
        .authorization_bearer(&owner)
        .json(&json!({"principal": "someone"}))
        .await;
    assert_eq!(response.status_code(), 400);
}
