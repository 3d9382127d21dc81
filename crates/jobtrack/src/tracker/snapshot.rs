use chrono::NaiveDate;
use serde::Serialize;

use crate::model::CandidatureRecord;
use crate::query;
use crate::stats::{GoalProgress, GoalSpec, Kpis};
use crate::view::{self, Projection, ViewState};

/// Everything the shell renders, computed in one pass.
///
/// KPI, goal and sector facets always cover the full collection; only the
/// projection honours the filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub kpis: Kpis,
    pub goal: GoalProgress,
    pub sectors: Vec<String>,
    pub projection: Projection,
}

impl Snapshot {
    pub fn compute(
        records: &[CandidatureRecord],
        state: &ViewState,
        goal: &GoalSpec,
        today: NaiveDate,
    ) -> Self {
        Self {
            kpis: Kpis::compute(records),
            goal: GoalProgress::compute(records, goal, today),
            sectors: query::sector_facets(records),
            projection: view::project(records, state),
        }
    }
}
