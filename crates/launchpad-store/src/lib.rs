//! Launchpad Store — key-value persistence behind a single trait.
//!
//! The group manager never touches disk directly; it is handed a
//! [`KeyValueStore`] at construction. Three implementations live here:
//! an in-memory map, a single JSON file, and a SQLite key-value table.

use std::sync::Arc;

use launchpad_core::{LaunchpadConfig, Result, StorageBackend};

pub mod json_file;
pub mod memory;
pub mod port;
pub mod schema;
pub mod sqlite;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use port::KeyValueStore;
pub use sqlite::SqliteStore;

/// Open the backend selected by `config.backend`.
pub fn open_store(config: &LaunchpadConfig) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        StorageBackend::Json => Arc::new(JsonFileStore::new(&config.data_paths.state_file)),
        StorageBackend::Sqlite => Arc::new(SqliteStore::open(&config.data_paths.db_dir)?),
    };
    Ok(store)
}
