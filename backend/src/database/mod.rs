//! Module for account store setup.
//!
//! Opens the store selected by the configuration and hands it out as a shared
//! `AccountStore` trait object.

use std::sync::Arc;

use restosys_adapters::{AccountStore, MemoryStore, SqliteStore, StoreError};
use tracing::info;

use crate::config::StoreBackend;

pub fn connect(backend: &StoreBackend) -> Result<Arc<dyn AccountStore>, StoreError> {
    let store: Arc<dyn AccountStore> = match backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Sqlite(path) => Arc::new(SqliteStore::open(path)?),
    };
    info!(backend = store.kind(), "account store connected");
    Ok(store)
}
