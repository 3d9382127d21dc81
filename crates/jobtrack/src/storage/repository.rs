//! Typed documents on top of a [`KeyValueStore`].
//!
//! Loads never fail: missing or corrupt documents degrade to an empty
//! collection or the default goal, with a warning. Saves surface errors.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::KeyValueStore;
use crate::error::StorageError;
use crate::model::CandidatureRecord;
use crate::stats::GoalSpec;

pub const RECORDS_KEY: &str = "stageTracker_v1";
pub const GOAL_KEY: &str = "stageTracker_goal";
pub const LAST_EXPORT_KEY: &str = "lastExportDate";

fn read(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to read '{}' from storage: {}", key, e);
            None
        }
    }
}

fn write<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::Serialize {
        key: key.to_string(),
        source: e,
    })?;
    store.set(key, &json)
}

/// Loads the record collection, or an empty one if absent or unreadable.
pub fn load_records(store: &dyn KeyValueStore) -> Vec<CandidatureRecord> {
    let Some(raw) = read(store, RECORDS_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<CandidatureRecord>>(&raw) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("Stored candidatures are corrupt, starting empty: {}", e);
            Vec::new()
        }
    }
}

pub fn save_records(
    store: &mut dyn KeyValueStore,
    records: &[CandidatureRecord],
) -> Result<(), StorageError> {
    write(store, RECORDS_KEY, records)
}

/// Loads the goal settings, or the defaults if absent or unreadable.
pub fn load_goal(store: &dyn KeyValueStore) -> GoalSpec {
    load_goal_or(store, GoalSpec::default())
}

/// Like [`load_goal`] with a caller-supplied fallback.
pub fn load_goal_or(store: &dyn KeyValueStore, fallback: GoalSpec) -> GoalSpec {
    let Some(raw) = read(store, GOAL_KEY) else {
        return fallback;
    };
    match serde_json::from_str::<GoalSpec>(&raw) {
        Ok(goal) => goal,
        Err(e) => {
            log::warn!("Stored goal is corrupt, using defaults: {}", e);
            fallback
        }
    }
}

pub fn save_goal(store: &mut dyn KeyValueStore, goal: &GoalSpec) -> Result<(), StorageError> {
    write(store, GOAL_KEY, goal)
}

/// Timestamp of the last export, if one was recorded and parses.
pub fn load_last_export(store: &dyn KeyValueStore) -> Option<DateTime<Utc>> {
    let raw = read(store, LAST_EXPORT_KEY)?;
    let text: String = serde_json::from_str(&raw).unwrap_or(raw);
    match DateTime::parse_from_rfc3339(text.trim()) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Ignoring unreadable last export date '{}': {}", text, e);
            None
        }
    }
}

pub fn save_last_export(
    store: &mut dyn KeyValueStore,
    at: DateTime<Utc>,
) -> Result<(), StorageError> {
    write(store, LAST_EXPORT_KEY, &at.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::stats::GoalPeriod;
    use chrono::TimeZone;

    #[test]
    fn test_missing_documents_use_defaults() {
        let store = MemoryStore::new();
        assert!(load_records(&store).is_empty());
        assert_eq!(load_goal(&store), GoalSpec::default());
        assert_eq!(load_last_export(&store), None);
    }

    #[test]
    fn test_corrupt_documents_fail_soft() {
        let store = MemoryStore::new()
            .with_entry(RECORDS_KEY, "{not json")
            .with_entry(GOAL_KEY, "{\"day\": 4}")
            .with_entry(LAST_EXPORT_KEY, "yesterday");
        assert!(load_records(&store).is_empty());
        assert_eq!(load_goal(&store), GoalSpec::default());
        assert_eq!(load_last_export(&store), None);
    }

    #[test]
    fn test_goal_roundtrip() {
        let mut store = MemoryStore::new();
        let mut goal = GoalSpec::default();
        goal.period = GoalPeriod::Week;
        goal.set_target(12);
        save_goal(&mut store, &goal).unwrap();
        assert_eq!(load_goal(&store), goal);
    }

    #[test]
    fn test_goal_with_partial_targets() {
        let store = MemoryStore::new().with_entry(GOAL_KEY, r#"{"period":"day","day":5}"#);
        let goal = load_goal(&store);
        assert_eq!(goal.period, GoalPeriod::Day);
        assert_eq!(goal.targets.day, 5);
        assert_eq!(goal.targets.week, 10);
    }

    #[test]
    fn test_last_export_accepts_plain_iso_string() {
        let store =
            MemoryStore::new().with_entry(LAST_EXPORT_KEY, "2026-10-01T12:00:00.000Z");
        assert_eq!(
            load_last_export(&store),
            Some(Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap())
        );

        let mut store = MemoryStore::new();
        let at = Utc.with_ymd_and_hms(2026, 10, 2, 8, 0, 0).unwrap();
        save_last_export(&mut store, at).unwrap();
        assert_eq!(load_last_export(&store), Some(at));
    }
}
