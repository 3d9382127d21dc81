//! Test harness for trackers over a file backend in a temp directory.
//!
//! Each harness owns its directory, so a tracker can be dropped and
//! reopened to check what actually reached storage.

#![allow(dead_code)]

use std::path::Path;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tempfile::TempDir;

use jobtrack::clock::FixedClock;
use jobtrack::config::TrackerConfig;
use jobtrack::storage::FileStore;
use jobtrack::tracker::{EventLog, Tracker};

pub struct TestHarness {
    temp_dir: TempDir,
    pub config: TrackerConfig,
    pub now: DateTime<Utc>,
    pub today: NaiveDate,
}

impl TestHarness {
    /// Pinned to Friday 2026-10-16, 09:30 UTC.
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let now = Utc
            .with_ymd_and_hms(2026, 10, 16, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        Self {
            temp_dir,
            config,
            today: now.date_naive(),
            now,
        }
    }

    pub fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn clock(&self) -> FixedClock {
        FixedClock::new(self.now).with_today(self.today)
    }

    /// Opens a tracker on the harness directory with a fresh event log.
    pub fn open(&self) -> (Tracker, EventLog) {
        let log = EventLog::new();
        let tracker = Tracker::with_parts(
            Box::new(FileStore::new(self.data_dir())),
            Box::new(self.clock()),
            Box::new(log.clone()),
            &self.config,
        );
        (tracker, log)
    }

    /// Writes a raw document as the backend would store it.
    pub fn write_document(&self, key: &str, content: &str) {
        let path = self.data_dir().join(format!("{}.json", key));
        std::fs::write(path, content).expect("Failed to write document");
    }

    pub fn read_document(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.data_dir().join(format!("{}.json", key))).ok()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
