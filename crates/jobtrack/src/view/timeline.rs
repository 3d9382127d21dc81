use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::model::CandidatureRecord;

/// Literal key of the group holding records with no effective date.
pub const UNDATED_KEY: &str = "undated";

/// Month bucket of the timeline.
///
/// Ordered so that a descending sort yields the newest month first and the
/// undated bucket last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthKey {
    Month { year: i32, month: u32 },
    Undated,
}

impl MonthKey {
    pub fn of(date: Option<NaiveDate>) -> Self {
        match date {
            Some(d) => MonthKey::Month {
                year: d.year(),
                month: d.month(),
            },
            None => MonthKey::Undated,
        }
    }
}

impl Ord for MonthKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (MonthKey::Undated, MonthKey::Undated) => Ordering::Equal,
            (MonthKey::Undated, MonthKey::Month { .. }) => Ordering::Less,
            (MonthKey::Month { .. }, MonthKey::Undated) => Ordering::Greater,
            (
                MonthKey::Month { year: ya, month: ma },
                MonthKey::Month { year: yb, month: mb },
            ) => (ya, ma).cmp(&(yb, mb)),
        }
    }
}

impl PartialOrd for MonthKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthKey::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            MonthKey::Undated => f.write_str(UNDATED_KEY),
        }
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineGroup {
    pub key: MonthKey,
    pub records: Vec<CandidatureRecord>,
}

/// Groups a filtered list by effective month, newest first.
///
/// The incoming order is only used to break ties: records are re-sorted by
/// effective date descending, so the caller's sort does not apply here.
pub fn project_timeline(list: &[CandidatureRecord]) -> Vec<TimelineGroup> {
    let mut dated: Vec<(Option<NaiveDate>, &CandidatureRecord)> =
        list.iter().map(|r| (r.effective_date(), r)).collect();
    // Stable; `None` sorts lowest so undated records land last.
    dated.sort_by(|(a, _), (b, _)| b.cmp(a));

    let mut groups: Vec<TimelineGroup> = Vec::new();
    for (date, record) in dated {
        let key = MonthKey::of(date);
        match groups.last_mut() {
            Some(group) if group.key == key => group.records.push(record.clone()),
            _ => groups.push(TimelineGroup {
                key,
                records: vec![record.clone()],
            }),
        }
    }
    groups
}
