//! Durable key-value backends and the typed documents stored in them.

pub mod filesystem;
pub mod memory;
pub mod repository;
pub mod sqlite;

pub use filesystem::FileStore;
pub use memory::MemoryStore;
pub use repository::{
    load_goal, load_goal_or, load_last_export, load_records, save_goal, save_last_export, save_records,
    GOAL_KEY, LAST_EXPORT_KEY, RECORDS_KEY,
};
pub use sqlite::SqliteStore;

use crate::config::{StorageBackend, TrackerConfig};
use crate::error::StorageError;

/// A string-valued document store, one document per key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Keys must be non-empty and limited to `[A-Za-z0-9_-]` so they map
/// safely onto file names.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Opens the backend selected in the configuration.
pub fn open_backend(config: &TrackerConfig) -> Result<Box<dyn KeyValueStore>, StorageError> {
    match config.backend {
        StorageBackend::Memory => Ok(Box::new(MemoryStore::new())),
        StorageBackend::File => {
            let dir = config
                .resolve_data_directory()
                .ok_or_else(|| StorageError::NoDataDirectory("file".to_string()))?;
            log::info!("Using file storage at {}", dir.display());
            Ok(Box::new(FileStore::new(dir)))
        }
        StorageBackend::Sqlite => {
            let dir = config
                .resolve_data_directory()
                .ok_or_else(|| StorageError::NoDataDirectory("sqlite".to_string()))?;
            let path = sqlite::database_path(&dir);
            Ok(Box::new(SqliteStore::open(&path)?))
        }
    }
}
