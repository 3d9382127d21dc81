use serde::{Deserialize, Serialize};

use crate::model::record::blank_as_none;
use crate::model::{CandidatureRecord, Priority, Status};

/// Filter criteria for the record views.
///
/// All fields are optional. When multiple fields are set, they are combined
/// with AND semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Stage (exact match).
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Sector (exact, case-sensitive match).
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    /// Priority (exact match).
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Case-insensitive substring over company, position, sector and notes.
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.sector_value().is_none()
            && self.priority.is_none()
            && self.search_needle().is_none()
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Sector to match; an empty string means no sector filter.
    fn sector_value(&self) -> Option<&str> {
        self.sector.as_deref().filter(|s| !s.is_empty())
    }

    /// Lowercased, trimmed search query; `None` when blank.
    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// Returns true if the record satisfies every present predicate.
    pub fn matches(&self, record: &CandidatureRecord) -> bool {
        self.matcher().matches(record)
    }

    /// Prepares the predicates once for a pass over many records.
    pub(crate) fn matcher(&self) -> Matcher<'_> {
        Matcher {
            spec: self,
            needle: self.search_needle(),
        }
    }
}

pub(crate) struct Matcher<'a> {
    spec: &'a FilterSpec,
    needle: Option<String>,
}

impl Matcher<'_> {
    pub(crate) fn matches(&self, record: &CandidatureRecord) -> bool {
        if let Some(status) = self.spec.status {
            if record.status != status {
                return false;
            }
        }
        if let Some(sector) = self.spec.sector_value() {
            if record.sector.as_deref() != Some(sector) {
                return false;
            }
        }
        if let Some(priority) = self.spec.priority {
            if record.priority != priority {
                return false;
            }
        }
        match &self.needle {
            Some(needle) => search_hit(record, needle),
            None => true,
        }
    }
}

fn search_hit(record: &CandidatureRecord, needle: &str) -> bool {
    let haystacks = [
        Some(record.company.as_str()),
        Some(record.position.as_str()),
        record.sector.as_deref(),
        record.notes.as_deref(),
    ];
    haystacks
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}
