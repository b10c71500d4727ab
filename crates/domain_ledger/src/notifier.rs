//! Event notifier
//!
//! One-way fan-out of committed ledger events to external observers
//! (dashboard, indexer). The notifier is publish-only from the ledger's
//! side: it never calls back into subscriber code, and it only ever sees
//! an event after the transition has committed. Slow subscribers that
//! fall behind the broadcast buffer catch up through the ledger's durable
//! event log.

use tokio::sync::broadcast;

use crate::events::SequencedEvent;

/// Broadcast fan-out of committed ledger events
#[derive(Debug)]
pub struct EventNotifier {
    tx: broadcast::Sender<SequencedEvent>,
}

impl EventNotifier {
    /// Creates a notifier buffering up to `capacity` undelivered events
    /// per subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Opens a new subscription starting at the next committed event
    pub fn subscribe(&self) -> broadcast::Receiver<SequencedEvent> {
        self.tx.subscribe()
    }

    /// Publishes a committed event to all current subscribers
    ///
    /// A send with no live subscribers is not an error; the durable log
    /// remains the source of record either way.
    pub(crate) fn publish(&self, event: &SequencedEvent) {
        let _ = self.tx.send(event.clone());
    }
}
