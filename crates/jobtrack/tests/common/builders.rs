//! Builder patterns for creating test data programmatically.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};

use jobtrack::config::{StorageBackend, TrackerConfig};
use jobtrack::model::{CandidatureRecord, Priority, RecordId, Status};
use jobtrack::stats::{GoalPeriod, GoalSpec};
use jobtrack::view::ViewMode;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Builder for creating `CandidatureRecord` instances.
pub struct RecordBuilder {
    record: CandidatureRecord,
}

impl RecordBuilder {
    /// A valid record with the given id; company "Acme", position "Dev".
    pub fn new(id: &str) -> Self {
        Self {
            record: CandidatureRecord {
                id: RecordId::new(id),
                company: "Acme".to_string(),
                position: "Dev".to_string(),
                location: None,
                sector: None,
                contract_type: None,
                priority: Priority::Medium,
                status: Status::Applied,
                applied_date: None,
                link: None,
                contact_name: None,
                contact_email: None,
                notes: None,
                created_at: None,
            },
        }
    }

    pub fn company(mut self, company: &str) -> Self {
        self.record.company = company.to_string();
        self
    }

    pub fn position(mut self, position: &str) -> Self {
        self.record.position = position.to_string();
        self
    }

    pub fn sector(mut self, sector: &str) -> Self {
        self.record.sector = Some(sector.to_string());
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.record.notes = Some(notes.to_string());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.record.status = status;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.record.priority = priority;
        self
    }

    pub fn applied(mut self, date: NaiveDate) -> Self {
        self.record.applied_date = Some(date);
        self
    }

    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.record.created_at = Some(at);
        self
    }

    pub fn build(self) -> CandidatureRecord {
        self.record
    }
}

/// Builder for creating `TrackerConfig` instances.
pub struct ConfigBuilder {
    config: TrackerConfig,
}

impl ConfigBuilder {
    /// In-memory backend, default view and goal.
    pub fn new() -> Self {
        Self {
            config: TrackerConfig {
                backend: StorageBackend::Memory,
                ..TrackerConfig::default()
            },
        }
    }

    pub fn backend(mut self, backend: StorageBackend, data_directory: &str) -> Self {
        self.config.backend = backend;
        self.config.data_directory = Some(data_directory.to_string());
        self
    }

    pub fn view(mut self, view: ViewMode) -> Self {
        self.config.view.view = view;
        self
    }

    pub fn goal(mut self, period: GoalPeriod, target: u32) -> Self {
        let mut goal = GoalSpec {
            period,
            ..GoalSpec::default()
        };
        goal.set_target(target);
        self.config.goal = goal;
        self
    }

    pub fn stale_export_days(mut self, days: u32) -> Self {
        self.config.stale_export_days = days;
        self
    }

    pub fn build(self) -> TrackerConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
