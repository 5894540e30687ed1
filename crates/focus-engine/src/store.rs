//! The event-store seam.
//!
//! The resolver never reads events on its own; it asks an [`EventStore`] for
//! the events of one work window at a time. Stores are scoped to a single
//! user by whoever constructs them.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::interval::{BusyEvent, Interval};

#[async_trait]
pub trait EventStore: Send + Sync {
    /// All events with `event.start < range.end && event.end > range.start`.
    async fn list_events(&self, range: &Interval) -> Result<Vec<BusyEvent>, StoreError>;
}

/// An event store holding a fixed list of events.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    events: Vec<BusyEvent>,
}

impl MemoryEventStore {
    pub fn new(events: Vec<BusyEvent>) -> Self {
        Self { events }
    }

    /// Load events from a JSON array of objects with `start` and `end`
    /// timestamps (see [`crate::parse_timestamp`]). Other fields are ignored.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let events: Vec<BusyEvent> =
            serde_json::from_str(json).map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(Self::new(events))
    }

    /// Synchronous form of [`EventStore::list_events`].
    pub fn events_in(&self, range: &Interval) -> Vec<BusyEvent> {
        self.events
            .iter()
            .filter(|e| e.intersects(range))
            .copied()
            .collect()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn list_events(&self, range: &Interval) -> Result<Vec<BusyEvent>, StoreError> {
        Ok(self.events_in(range))
    }
}
