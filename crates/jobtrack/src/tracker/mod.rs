//! The tracker owns the record collection, the view state and the goal.
//!
//! It is the single entry point for mutations. Each successful mutation
//! is saved, then the snapshot (KPI, goal, facets, active projection) is
//! recomputed. A failed save keeps the in-memory change and still
//! recomputes; the error is returned and a `PersistFailed` event fires.

mod events;
mod snapshot;

pub use events::{EventLog, EventSink, LogSink, NoopSink, RemovedRecord, TrackerEvent};
pub use snapshot::Snapshot;

use chrono::{DateTime, Utc};
use tracing::info_span;

use crate::clock::{Clock, SystemClock};
use crate::config::TrackerConfig;
use crate::error::{Result, StorageError, TrackerError};
use crate::model::{CandidatureRecord, NewRecord, RecordId, RecordPatch, Status};
use crate::query::{FilterSpec, SortColumn};
use crate::sanitize;
use crate::stats::{GoalPeriod, GoalSpec, GoalState, GoalTrigger};
use crate::storage::{self, KeyValueStore, GOAL_KEY, LAST_EXPORT_KEY, RECORDS_KEY};
use crate::store::RecordStore;
use crate::transfer::{self, ExportBundle};
use crate::view::{StatusChange, ViewMode, ViewState};

pub struct Tracker {
    store: RecordStore,
    backend: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    sink: Box<dyn EventSink>,
    view: ViewState,
    goal: GoalSpec,
    trigger: GoalTrigger,
    stale_export_days: u32,
    snapshot: Snapshot,
}

impl Tracker {
    /// Opens on `backend` with default settings, the system clock and a
    /// sink that logs every event.
    pub fn open(backend: Box<dyn KeyValueStore>) -> Self {
        Self::with_parts(
            backend,
            Box::new(SystemClock),
            Box::new(LogSink),
            &TrackerConfig::default(),
        )
    }

    /// Opens the backend selected by `config`.
    pub fn from_config(config: &TrackerConfig) -> Result<Self> {
        let backend = storage::open_backend(config)?;
        Ok(Self::with_parts(
            backend,
            Box::new(SystemClock),
            Box::new(LogSink),
            config,
        ))
    }

    /// Loads stored records and goal, then evaluates the goal once. A goal
    /// already reached at load time fires `GoalReached` here.
    pub fn with_parts(
        backend: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        sink: Box<dyn EventSink>,
        config: &TrackerConfig,
    ) -> Self {
        let loaded = storage::load_records(&*backend);
        let store = match RecordStore::from_records(loaded) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("Stored candidatures are inconsistent, starting empty: {}", e);
                RecordStore::new()
            }
        };
        let goal = storage::load_goal_or(&*backend, config.goal);
        let view = config.view.clone();
        let snapshot = Snapshot::compute(store.records(), &view, &goal, clock.today());

        log::info!("Tracker opened with {} candidatures", store.len());

        let mut tracker = Self {
            store,
            backend,
            clock,
            sink,
            view,
            goal,
            trigger: GoalTrigger::default(),
            stale_export_days: config.stale_export_days,
            snapshot,
        };
        tracker.observe_goal();
        tracker
    }

    pub fn records(&self) -> &[CandidatureRecord] {
        self.store.records()
    }

    pub fn get(&self, id: &RecordId) -> Option<&CandidatureRecord> {
        self.store.get(id)
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn goal(&self) -> &GoalSpec {
        &self.goal
    }

    pub fn goal_state(&self) -> GoalState {
        self.trigger.state()
    }

    /// The last computed snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn create(&mut self, fields: NewRecord) -> Result<RecordId> {
        let record = fields.into_record(RecordId::generate(), self.clock.now())?;
        let id = record.id.clone();
        log::debug!(
            "Creating {} (contact {}, link {})",
            sanitize::record_label(&record),
            record
                .contact_email
                .as_deref()
                .map(sanitize::redact_email)
                .unwrap_or_default(),
            record
                .link
                .as_deref()
                .map(sanitize::redact_link)
                .unwrap_or_default()
        );
        let event = TrackerEvent::Created {
            id: id.clone(),
            company: record.company.clone(),
            position: record.position.clone(),
        };

        self.store.insert_front(record)?;
        self.sink.report(event);
        self.commit()?;
        Ok(id)
    }

    /// Merges `patch` into the record. `id` and `createdAt` never change.
    pub fn update(&mut self, id: &RecordId, patch: RecordPatch) -> Result<()> {
        let record = self
            .store
            .get_mut(id)
            .ok_or_else(|| TrackerError::NotFound(id.clone()))?;
        patch.validate()?;

        let fields = patch.changed_fields();
        let before = record.status;
        patch.apply_to(record);
        let change = (record.status != before).then(|| StatusChange {
            id: id.clone(),
            company: record.company.clone(),
            from: before,
            to: record.status,
        });

        log::debug!("Updating {}: {}", id, fields.join(", "));
        self.sink.report(TrackerEvent::Updated {
            id: id.clone(),
            fields,
        });
        if let Some(change) = change {
            self.sink.report(TrackerEvent::StatusChanged(change));
        }
        self.commit()
    }

    pub fn delete(&mut self, id: &RecordId) -> Result<RemovedRecord> {
        let record = self
            .store
            .remove(id)
            .ok_or_else(|| TrackerError::NotFound(id.clone()))?;
        let removed = RemovedRecord {
            id: record.id,
            company: record.company,
            position: record.position,
        };

        self.sink.report(TrackerEvent::Deleted(removed.clone()));
        self.commit()?;
        Ok(removed)
    }

    /// Moves a record to `status`. Returns `None` without saving when the
    /// record is already there.
    pub fn set_status(&mut self, id: &RecordId, status: Status) -> Result<Option<StatusChange>> {
        let record = self
            .store
            .get_mut(id)
            .ok_or_else(|| TrackerError::NotFound(id.clone()))?;
        if record.status == status {
            return Ok(None);
        }

        let change = StatusChange {
            id: id.clone(),
            company: record.company.clone(),
            from: record.status,
            to: status,
        };
        record.status = status;

        self.sink.report(TrackerEvent::StatusChanged(change.clone()));
        self.commit()?;
        Ok(Some(change))
    }

    /// Replaces the whole collection. Nothing changes unless every record
    /// is valid and ids are unique.
    pub fn replace_all(&mut self, records: Vec<CandidatureRecord>) -> Result<()> {
        let count = records.len();
        self.store.replace_all(records)?;
        self.sink.report(TrackerEvent::Replaced { count });
        self.commit()
    }

    /// Restores a JSON backup: records plus any view state it carries.
    pub fn import_backup(&mut self, json: &str) -> Result<usize> {
        let _span = info_span!("tracker.import", bytes = json.len()).entered();

        let mut payload = transfer::parse_import(json)?;
        let count = payload.records.len();
        self.store.replace_all(std::mem::take(&mut payload.records))?;
        payload.apply_view_state(&mut self.view);

        self.sink.report(TrackerEvent::Imported { count });
        self.commit()?;
        Ok(count)
    }

    pub fn export_backup(&self) -> Result<String> {
        Ok(transfer::export_backup(self.store.records(), &self.view)?)
    }

    /// Full collection and KPI for spreadsheet or PDF writers.
    pub fn export_bundle(&self) -> ExportBundle {
        ExportBundle::new(self.store.records(), self.clock.now())
    }

    /// Dated file name for a JSON backup taken now.
    pub fn backup_file_name(&self) -> String {
        transfer::backup_file_name(self.clock.today())
    }

    /// Stores the current time as the last export date.
    pub fn record_export(&mut self) -> Result<DateTime<Utc>> {
        let at = self.clock.now();
        storage::save_last_export(&mut *self.backend, at)
            .map_err(|e| self.persist_failed(LAST_EXPORT_KEY, e))?;
        self.sink.report(TrackerEvent::Exported { at });
        Ok(at)
    }

    pub fn last_export(&self) -> Option<DateTime<Utc>> {
        storage::load_last_export(&*self.backend)
    }

    /// True when a reminder to export is due.
    pub fn export_is_stale(&self) -> bool {
        transfer::export_is_stale(self.last_export(), self.clock.now(), self.stale_export_days)
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view.view = view;
        self.recompute();
    }

    pub fn set_filter(&mut self, filters: FilterSpec) {
        self.view.filters = filters;
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.set_filter(FilterSpec::default());
    }

    /// Header click: flips the active column, starts a new one ascending.
    pub fn sort_by(&mut self, column: SortColumn) {
        self.view.sort = self.view.sort.toggled(column);
        self.recompute();
    }

    pub fn set_goal_period(&mut self, period: GoalPeriod) -> Result<()> {
        self.goal.period = period;
        self.save_goal()
    }

    /// Sets the active period's target, clamped to `1..=999`. Returns the
    /// stored value.
    pub fn set_goal_target(&mut self, target: u32) -> Result<u32> {
        self.goal.set_target(target);
        self.save_goal()?;
        Ok(self.goal.target())
    }

    /// Recomputes against the current clock, e.g. after midnight.
    pub fn refresh(&mut self) {
        self.recompute();
    }

    fn commit(&mut self) -> Result<()> {
        let saved = storage::save_records(&mut *self.backend, self.store.records());
        self.recompute();
        saved.map_err(|e| self.persist_failed(RECORDS_KEY, e))
    }

    fn save_goal(&mut self) -> Result<()> {
        let saved = storage::save_goal(&mut *self.backend, &self.goal);
        self.recompute();
        saved.map_err(|e| self.persist_failed(GOAL_KEY, e))
    }

    fn persist_failed(&self, key: &'static str, error: StorageError) -> TrackerError {
        self.sink.report(TrackerEvent::PersistFailed {
            key,
            error: error.to_string(),
        });
        TrackerError::Storage(error)
    }

    fn recompute(&mut self) {
        let _span = info_span!(
            "tracker.recompute",
            records = self.store.len(),
            view = ?self.view.view
        )
        .entered();

        self.snapshot = Snapshot::compute(
            self.store.records(),
            &self.view,
            &self.goal,
            self.clock.today(),
        );
        self.observe_goal();
    }

    fn observe_goal(&mut self) {
        if self.trigger.observe(&self.snapshot.goal) {
            self.sink
                .report(TrackerEvent::GoalReached(self.snapshot.goal));
        }
    }
}
