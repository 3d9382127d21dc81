//! Read-models for the three presentation views.
//!
//! Each projection consumes the query engine's filtered output; only the
//! list view keeps the user's sort.

pub mod kanban;
pub mod timeline;

use serde::{Deserialize, Serialize};

pub use kanban::{KanbanBoard, KanbanColumn, StatusChange};
pub use timeline::{project_timeline, MonthKey, TimelineGroup, UNDATED_KEY};

use crate::model::CandidatureRecord;
use crate::query::{self, FilterSpec, SortSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Kanban,
    Timeline,
}

/// Query and presentation state the user controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    #[serde(default)]
    pub view: ViewMode,
    #[serde(default)]
    pub sort: SortSpec,
    #[serde(default)]
    pub filters: FilterSpec,
}

/// The computed content of the active view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "lowercase")]
pub enum Projection {
    List(Vec<CandidatureRecord>),
    Kanban(KanbanBoard),
    Timeline(Vec<TimelineGroup>),
}

impl Projection {
    pub fn mode(&self) -> ViewMode {
        match self {
            Projection::List(_) => ViewMode::List,
            Projection::Kanban(_) => ViewMode::Kanban,
            Projection::Timeline(_) => ViewMode::Timeline,
        }
    }

    /// Number of records shown, across columns or groups.
    pub fn record_count(&self) -> usize {
        match self {
            Projection::List(list) => list.len(),
            Projection::Kanban(board) => board.len(),
            Projection::Timeline(groups) => groups.iter().map(|g| g.records.len()).sum(),
        }
    }
}

/// Runs the query engine and the projector for `state.view`.
pub fn project(records: &[CandidatureRecord], state: &ViewState) -> Projection {
    project_as(records, state.view, &state.filters, &state.sort)
}

/// Same as [`project`] with an explicit mode.
pub fn project_as(
    records: &[CandidatureRecord],
    mode: ViewMode,
    filters: &FilterSpec,
    sort: &SortSpec,
) -> Projection {
    let list = query::filter_and_sort(records, filters, sort);
    match mode {
        ViewMode::List => Projection::List(list),
        ViewMode::Kanban => Projection::Kanban(KanbanBoard::project(&list)),
        ViewMode::Timeline => Projection::Timeline(project_timeline(&list)),
    }
}
