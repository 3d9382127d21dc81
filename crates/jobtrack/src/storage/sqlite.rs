//! Key-value documents in a SQLite file.
//!
//! The tracker is single-threaded, so the store owns one connection
//! outright. The schema version lives in `PRAGMA user_version`.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::{validate_key, KeyValueStore};
use crate::error::StorageError;

/// Schema steps in order; entry `n` upgrades the file to version `n + 1`.
const SCHEMA: &[&str] = &["CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );"];

/// Canonical database file inside a data directory.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join("jobtrack.db")
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates the database file, creating parent directories
    /// and upgrading the schema as needed.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        upgrade_schema(&conn)?;

        log::info!("SQLite store opened at {}", path.display());
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        upgrade_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn schema_version(&self) -> Result<u32, StorageError> {
        Ok(schema_version(&self.conn)?)
    }
}

fn schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

fn upgrade_schema(conn: &Connection) -> Result<(), StorageError> {
    let current = schema_version(conn)? as usize;

    for (index, sql) in SCHEMA.iter().enumerate().skip(current) {
        let version = index as u32 + 1;
        log::info!("Upgrading SQLite schema to v{}", version);
        conn.execute_batch(sql)
            .and_then(|_| conn.execute_batch(&format!("PRAGMA user_version = {};", version)))
            .map_err(|e| StorageError::Schema {
                version,
                reason: e.to_string(),
            })?;
    }

    Ok(())
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_is_at_latest_schema() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.schema_version().unwrap(), SCHEMA.len() as u32);
    }

    #[test]
    fn test_schema_upgrade_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        upgrade_schema(&conn).unwrap();
        upgrade_schema(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 1);
    }

    #[test]
    fn test_set_overwrites_single_row() {
        let mut store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.get("stageTracker_v1").unwrap(), None);
        store.set("stageTracker_v1", "[]").unwrap();
        store.set("stageTracker_v1", "[{}]").unwrap();
        assert_eq!(store.get("stageTracker_v1").unwrap().as_deref(), Some("[{}]"));

        let (rows, stamped): (u32, u32) = store
            .conn
            .query_row(
                "SELECT COUNT(*), COUNT(updated_at) FROM kv",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!((rows, stamped), (1, 1));
    }

    #[test]
    fn test_rejects_invalid_keys() {
        let mut store = SqliteStore::in_memory().unwrap();
        assert!(matches!(
            store.set("a b", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = database_path(&dir.path().join("nested"));
        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.set("stageTracker_goal", "{\"period\":\"week\"}").unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.get("stageTracker_goal").unwrap().as_deref(),
            Some("{\"period\":\"week\"}")
        );
        assert_eq!(store.schema_version().unwrap(), 1);
    }
}
