//! Event DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use domain_ledger::{ClaimEvent, SequencedEvent};

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub sequence: u64,
    pub claim_id: u64,
    pub event_type: String,
    pub recorded_at: DateTime<Utc>,
    pub payload: ClaimEvent,
}

impl From<SequencedEvent> for EventResponse {
    fn from(event: SequencedEvent) -> Self {
        Self {
            sequence: event.sequence,
            claim_id: event.event.claim_id().as_u64(),
            event_type: event.event.event_type().to_string(),
            recorded_at: event.recorded_at,
            payload: event.event,
        }
    }
}
