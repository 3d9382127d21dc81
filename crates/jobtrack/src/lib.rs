//! Job-application tracker engine.
//!
//! Holds a collection of candidatures, derives list, kanban and timeline
//! views through one filter/sort pipeline, computes KPI and goal progress,
//! and persists through a pluggable key-value backend.

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod query;
pub mod sanitize;
pub mod stats;
pub mod storage;
pub mod store;
pub mod tracker;
pub mod transfer;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{load_config, load_config_from_str, StorageBackend, TrackerConfig};
pub use error::{
    ConfigError, FormatError, Result, StorageError, TrackerError, ValidationError,
};
pub use model::{CandidatureRecord, NewRecord, Priority, RecordId, RecordPatch, Status};
pub use query::{FilterSpec, SortColumn, SortDirection, SortSpec};
pub use stats::{GoalPeriod, GoalProgress, GoalSpec, GoalState, GoalTrigger, Kpis};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SqliteStore};
pub use store::RecordStore;
pub use tracker::{EventLog, EventSink, LogSink, NoopSink, RemovedRecord, Snapshot, Tracker, TrackerEvent};
pub use transfer::{ExportBundle, ImportPayload};
pub use view::{KanbanBoard, MonthKey, Projection, StatusChange, TimelineGroup, ViewMode, ViewState};
