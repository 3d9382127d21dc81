use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::model::RecordId;
use crate::stats::GoalProgress;
use crate::view::StatusChange;

/// Identity of a deleted candidature, for the confirmation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedRecord {
    pub id: RecordId,
    pub company: String,
    pub position: String,
}

/// Events emitted by the tracker after each mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    Created {
        id: RecordId,
        company: String,
        position: String,
    },
    Updated {
        id: RecordId,
        fields: Vec<&'static str>,
    },
    Deleted(RemovedRecord),
    StatusChanged(StatusChange),
    /// The collection was swapped wholesale.
    Replaced {
        count: usize,
    },
    Imported {
        count: usize,
    },
    Exported {
        at: DateTime<Utc>,
    },
    /// Fired once per crossing of the goal threshold.
    GoalReached(GoalProgress),
    PersistFailed {
        key: &'static str,
        error: String,
    },
}

pub trait EventSink {
    fn report(&self, event: TrackerEvent);
}

/// Drops every event.
pub struct NoopSink;

impl EventSink for NoopSink {
    fn report(&self, _event: TrackerEvent) {}
}

/// Writes events to the `log` facade.
pub struct LogSink;

impl EventSink for LogSink {
    fn report(&self, event: TrackerEvent) {
        match event {
            TrackerEvent::Created { id, company, .. } => {
                log::info!("Candidature added: {} ({})", company, id)
            }
            TrackerEvent::Updated { id, fields } => {
                log::info!("Candidature {} updated: {}", id, fields.join(", "))
            }
            TrackerEvent::Deleted(removed) => {
                log::info!("Candidature deleted: {} ({})", removed.company, removed.id)
            }
            TrackerEvent::StatusChanged(change) => log::info!(
                "{} moved from {} to {}",
                change.company,
                change.from,
                change.to
            ),
            TrackerEvent::Replaced { count } => {
                log::info!("Collection replaced with {} candidatures", count)
            }
            TrackerEvent::Imported { count } => {
                log::info!("Imported {} candidatures", count)
            }
            TrackerEvent::Exported { at } => log::info!("Export recorded at {}", at),
            TrackerEvent::GoalReached(progress) => log::info!(
                "Goal reached: {}/{} ({:?})",
                progress.count,
                progress.target,
                progress.period
            ),
            TrackerEvent::PersistFailed { key, error } => {
                log::error!("Failed to save '{}': {}", key, error)
            }
        }
    }
}

/// Collects events in memory. Clones share the same buffer, so a test can
/// hand one clone to the tracker and inspect the other.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<TrackerEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackerEvent> {
        self.events.borrow().clone()
    }

    /// Returns and clears the collected events.
    pub fn take(&self) -> Vec<TrackerEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn goal_reached_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, TrackerEvent::GoalReached(_)))
            .count()
    }
}

impl EventSink for EventLog {
    fn report(&self, event: TrackerEvent) {
        self.events.borrow_mut().push(event);
    }
}
