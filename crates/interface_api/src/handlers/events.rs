//! Event log handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::dto::events::EventResponse;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// Return only events with a sequence strictly greater than this
    #[serde(default)]
    pub after: u64,
}

/// Lists committed ledger events in commit order
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Vec<EventResponse>>, ApiError> {
    let events = state.ledger.events_after(query.after).await;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}
