//! Event-store backends for the server.

mod file;
mod rest;

use std::sync::Arc;

use focus_engine::{EventStore, StoreError};

use crate::config::{StoreBackend, StoreConfig};

pub use file::FileEventStore;
pub use rest::RestEventStore;

/// Build the store selected by `config.backend`.
pub fn from_config(config: &StoreConfig) -> Result<Arc<dyn EventStore>, StoreError> {
    let store: Arc<dyn EventStore> = match config.backend {
        StoreBackend::Rest => Arc::new(RestEventStore::new(&config.rest)?),
        StoreBackend::File => Arc::new(FileEventStore::new(config.file.path.clone())),
    };
    tracing::info!(backend = ?config.backend, "event store ready");
    Ok(store)
}
