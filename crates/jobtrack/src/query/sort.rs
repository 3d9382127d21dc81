use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::CandidatureRecord;

/// Record field used as the single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    Company,
    Position,
    Location,
    Sector,
    #[serde(rename = "type")]
    ContractType,
    Priority,
    Status,
    AppliedDate,
    ContactName,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// Most recent applications first.
    fn default() -> Self {
        Self {
            column: SortColumn::AppliedDate,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    pub fn asc(column: SortColumn) -> Self {
        Self::new(column, SortDirection::Asc)
    }

    pub fn desc(column: SortColumn) -> Self {
        Self::new(column, SortDirection::Desc)
    }

    /// Header-click semantics: the active column flips direction, any other
    /// column starts ascending.
    pub fn toggled(self, column: SortColumn) -> Self {
        if self.column == column {
            Self::new(column, self.direction.flipped())
        } else {
            Self::asc(column)
        }
    }

    /// Compares two records on this spec's column and direction.
    pub fn compare(&self, a: &CandidatureRecord, b: &CandidatureRecord) -> Ordering {
        let ordering = compare_column(self.column, a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Stable in-place sort; equal keys keep their relative order.
    pub fn sort(&self, records: &mut [CandidatureRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

/// Ascending comparison on one column. Missing values sort before present
/// ones; dates compare chronologically, stage and priority by enum index,
/// text case-folded.
fn compare_column(column: SortColumn, a: &CandidatureRecord, b: &CandidatureRecord) -> Ordering {
    match column {
        SortColumn::Company => compare_text(Some(&a.company), Some(&b.company)),
        SortColumn::Position => compare_text(Some(&a.position), Some(&b.position)),
        SortColumn::Location => compare_text(a.location.as_ref(), b.location.as_ref()),
        SortColumn::Sector => compare_text(a.sector.as_ref(), b.sector.as_ref()),
        SortColumn::ContractType => {
            compare_text(a.contract_type.as_ref(), b.contract_type.as_ref())
        }
        SortColumn::ContactName => compare_text(a.contact_name.as_ref(), b.contact_name.as_ref()),
        SortColumn::Priority => a.priority.index().cmp(&b.priority.index()),
        SortColumn::Status => a.status.index().cmp(&b.status.index()),
        SortColumn::AppliedDate => a.applied_date.cmp(&b.applied_date),
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn compare_text(a: Option<&String>, b: Option<&String>) -> Ordering {
    let a = a.map(|s| s.to_lowercase()).unwrap_or_default();
    let b = b.map(|s| s.to_lowercase()).unwrap_or_default();
    a.cmp(&b)
}
