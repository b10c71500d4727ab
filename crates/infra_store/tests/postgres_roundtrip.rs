//! Round-trip tests against a live PostgreSQL instance.
//!
//! Run with a database available:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/claim_ledger_test cargo test -p infra_store -- --ignored
//! ```

use chrono::Utc;
use core_kernel::{Amount, ClaimId, CurrencyCode, DocumentHash, HospitalId, PrincipalId};
use domain_ledger::{Claim, ClaimEvent, LedgerStore, Role, SequencedEvent};
use infra_store::{create_pool, PgLedgerStore, StoreConfig};

async fn test_store() -> PgLedgerStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for ignored tests");
    let pool = create_pool(&StoreConfig::new(url)).await.unwrap();
    let store = PgLedgerStore::new(pool);
    store.migrate().await.unwrap();
    store
}

fn sample_claim(id: u64) -> Claim {
    Claim::submitted(
        ClaimId::new(id),
        HospitalId::new("HOSP-777"),
        Amount::new(250_000, CurrencyCode::new("INR")).unwrap(),
        DocumentHash::new("QmRoundTrip"),
        PrincipalId::new("hospital-admin-7"),
    )
}

#[tokio::test]
#[ignore]
async fn claim_and_event_survive_reload() {
    let store = test_store().await;
    let claim = sample_claim(90_001);
    let event = SequencedEvent {
        sequence: 1,
        recorded_at: Utc::now(),
        event: ClaimEvent::ClaimSubmitted {
            id: claim.id,
            hospital_id: claim.hospital_id.clone(),
            amount: claim.amount.clone(),
        },
    };

    store.persist_claim(&claim, &event).await.unwrap();

    let snapshot = store.load().await.unwrap();
    let loaded = snapshot
        .claims
        .iter()
        .find(|c| c.id == claim.id)
        .expect("persisted claim present");
    assert_eq!(loaded.status, claim.status);
    assert_eq!(loaded.amount.minor_units(), 250_000);
    assert!(snapshot.events.iter().any(|e| e.event.claim_id() == claim.id));
}

#[tokio::test]
#[ignore]
async fn grant_then_revoke_is_idempotent() {
    let store = test_store().await;
    let principal = PrincipalId::new("roundtrip-validator");

    store
        .persist_grant(Role::Validator, &principal)
        .await
        .unwrap();
    store
        .persist_grant(Role::Validator, &principal)
        .await
        .unwrap();

    let snapshot = store.load().await.unwrap();
    let count = snapshot
        .grants
        .iter()
        .filter(|(role, p)| *role == Role::Validator && *p == principal)
        .count();
    assert_eq!(count, 1);

    store
        .persist_revoke(Role::Validator, &principal)
        .await
        .unwrap();
    let snapshot = store.load().await.unwrap();
    assert!(!snapshot
        .grants
        .iter()
        .any(|(role, p)| *role == Role::Validator && *p == principal));
}
