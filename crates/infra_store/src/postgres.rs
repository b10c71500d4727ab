//! PostgreSQL implementation of the ledger persistence port
//!
//! Claims are upserted and their transition events appended in a single
//! transaction, so a committed transition is never half-persisted. Event
//! payloads are stored as JSONB alongside denormalized claim id and type
//! columns for the indexer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use core_kernel::{Amount, ClaimId, CurrencyCode, DocumentHash, HospitalId, PrincipalId};
use domain_ledger::{
    Claim, ClaimStatus, LedgerSnapshot, LedgerStore, Role, SequencedEvent, StoreError,
};

/// Durable ledger store backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
}

impl PgLedgerStore {
    /// Creates a store over an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the schema migrations
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        info!("schema migrations applied");
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn load(&self) -> Result<LedgerSnapshot, StoreError> {
        let claim_rows = sqlx::query(
            "SELECT claim_id, hospital_id, amount_minor, currency, document_hash, \
                    status, fraud_score, submitted_by, submitted_at, updated_at \
             FROM claims ORDER BY submitted_at, claim_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        let mut claims = Vec::with_capacity(claim_rows.len());
        for row in &claim_rows {
            claims.push(claim_from_row(row)?);
        }

        let grant_rows = sqlx::query("SELECT role, principal FROM role_grants")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        let mut grants = Vec::with_capacity(grant_rows.len());
        for row in &grant_rows {
            let role: String = row.try_get("role").map_err(map_sqlx_err)?;
            let principal: String = row.try_get("principal").map_err(map_sqlx_err)?;
            let role = role
                .parse::<Role>()
                .map_err(StoreError::Corrupt)?;
            grants.push((role, PrincipalId::new(principal)));
        }

        let event_rows = sqlx::query(
            "SELECT sequence, payload::text AS payload, recorded_at \
             FROM ledger_events ORDER BY sequence",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        let mut events = Vec::with_capacity(event_rows.len());
        for row in &event_rows {
            let sequence: i64 = row.try_get("sequence").map_err(map_sqlx_err)?;
            let payload: String = row.try_get("payload").map_err(map_sqlx_err)?;
            let recorded_at: DateTime<Utc> = row.try_get("recorded_at").map_err(map_sqlx_err)?;
            let event = serde_json::from_str(&payload)
                .map_err(|e| StoreError::Corrupt(format!("event payload: {e}")))?;
            events.push(SequencedEvent {
                sequence: sequence as u64,
                recorded_at,
                event,
            });
        }

        Ok(LedgerSnapshot {
            claims,
            grants,
            events,
        })
    }

    async fn persist_claim(
        &self,
        claim: &Claim,
        event: &SequencedEvent,
    ) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&event.event)
            .map_err(|e| StoreError::Corrupt(format!("event payload: {e}")))?;

        let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

        sqlx::query(
            "INSERT INTO claims (claim_id, hospital_id, amount_minor, currency, \
                                 document_hash, status, fraud_score, submitted_by, \
                                 submitted_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (claim_id) DO UPDATE SET \
                 status = EXCLUDED.status, \
                 fraud_score = EXCLUDED.fraud_score, \
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(claim.id.as_u64() as i64)
        .bind(claim.hospital_id.as_str())
        .bind(claim.amount.minor_units())
        .bind(claim.amount.currency().as_str())
        .bind(claim.document_hash.as_str())
        .bind(i16::from(claim.status.code()))
        .bind(claim.fraud_score.map(i16::from))
        .bind(claim.submitted_by.as_str())
        .bind(claim.submitted_at)
        .bind(claim.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_err)?;

        sqlx::query(
            "INSERT INTO ledger_events (sequence, event_id, claim_id, event_type, \
                                        payload, recorded_at) \
             VALUES ($1, $2, $3, $4, $5::jsonb, $6)",
        )
        .bind(event.sequence as i64)
        .bind(Uuid::now_v7())
        .bind(event.event.claim_id().as_u64() as i64)
        .bind(event.event.event_type())
        .bind(payload)
        .bind(event.recorded_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_err)?;

        tx.commit().await.map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn persist_grant(
        &self,
        role: Role,
        principal: &PrincipalId,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO role_grants (role, principal) VALUES ($1, $2) \
             ON CONFLICT (role, principal) DO NOTHING",
        )
        .bind(role.as_str())
        .bind(principal.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn persist_revoke(
        &self,
        role: Role,
        principal: &PrincipalId,
    ) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM role_grants WHERE role = $1 AND principal = $2")
            .bind(role.as_str())
            .bind(principal.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(())
    }
}

fn claim_from_row(row: &sqlx::postgres::PgRow) -> Result<Claim, StoreError> {
    let claim_id: i64 = row.try_get("claim_id").map_err(map_sqlx_err)?;
    let hospital_id: String = row.try_get("hospital_id").map_err(map_sqlx_err)?;
    let amount_minor: i64 = row.try_get("amount_minor").map_err(map_sqlx_err)?;
    let currency: String = row.try_get("currency").map_err(map_sqlx_err)?;
    let document_hash: String = row.try_get("document_hash").map_err(map_sqlx_err)?;
    let status_code: i16 = row.try_get("status").map_err(map_sqlx_err)?;
    let fraud_score: Option<i16> = row.try_get("fraud_score").map_err(map_sqlx_err)?;
    let submitted_by: String = row.try_get("submitted_by").map_err(map_sqlx_err)?;
    let submitted_at: DateTime<Utc> = row.try_get("submitted_at").map_err(map_sqlx_err)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(map_sqlx_err)?;

    let status = ClaimStatus::from_code(status_code as u8)
        .ok_or_else(|| StoreError::Corrupt(format!("unknown status code {status_code}")))?;
    let amount = Amount::new(amount_minor, CurrencyCode::new(currency))
        .map_err(|e| StoreError::Corrupt(format!("claim {claim_id}: {e}")))?;

    Ok(Claim {
        id: ClaimId::new(claim_id as u64),
        hospital_id: HospitalId::new(hospital_id),
        amount,
        document_hash: DocumentHash::new(document_hash),
        status,
        fraud_score: fraud_score.map(|s| s as u8),
        submitted_by: PrincipalId::new(submitted_by),
        submitted_at,
        updated_at,
    })
}

fn map_sqlx_err(error: sqlx::Error) -> StoreError {
    match error {
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => StoreError::Connection(error.to_string()),
        other => StoreError::Query(other.to_string()),
    }
}
