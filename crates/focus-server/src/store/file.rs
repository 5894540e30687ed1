use std::path::PathBuf;

use async_trait::async_trait;
use focus_engine::{BusyEvent, EventStore, Interval, MemoryEventStore, StoreError};

/// Events kept in a JSON file, re-read on every request so edits show up
/// without a restart.
#[derive(Debug, Clone)]
pub struct FileEventStore {
    path: PathBuf,
}

impl FileEventStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl EventStore for FileEventStore {
    async fn list_events(&self, range: &Interval) -> Result<Vec<BusyEvent>, StoreError> {
        let json = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            StoreError::Unavailable(format!("failed to read {}: {e}", self.path.display()))
        })?;
        let events = MemoryEventStore::from_json(&json)?;
        Ok(events.events_in(range))
    }
}
