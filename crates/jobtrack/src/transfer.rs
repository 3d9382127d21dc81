//! JSON backup import/export and the data handed to spreadsheet/PDF writers.
//!
//! Backups carry the full collection plus the view state:
//! `{"candidatures": [...], "view": "list", "sort": {...}, "filters": {...}}`.
//! Older backups store the sort flat as `sortCol`/`sortDir`; both shapes
//! are accepted on import.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::FormatError;
use crate::model::CandidatureRecord;
use crate::query::{FilterSpec, SortColumn, SortDirection, SortSpec};
use crate::stats::Kpis;
use crate::view::{ViewMode, ViewState};

/// Serialized shape of a backup.
#[derive(Debug, Serialize)]
pub struct BackupDocument<'a> {
    pub candidatures: &'a [CandidatureRecord],
    #[serde(flatten)]
    pub state: &'a ViewState,
}

/// Suggested file name for a backup taken on `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("job_tracker_backup_{}.json", date.format("%Y-%m-%d"))
}

pub fn export_backup(
    records: &[CandidatureRecord],
    state: &ViewState,
) -> Result<String, FormatError> {
    let document = BackupDocument {
        candidatures: records,
        state,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// A parsed, validated backup. View fields are `None` when the payload
/// did not carry them.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPayload {
    pub records: Vec<CandidatureRecord>,
    pub view: Option<ViewMode>,
    pub sort: Option<SortSpec>,
    pub filters: Option<FilterSpec>,
}

impl ImportPayload {
    /// Overwrites the parts of `state` the payload carried.
    pub fn apply_view_state(&self, state: &mut ViewState) {
        if let Some(view) = self.view {
            state.view = view;
        }
        if let Some(sort) = self.sort {
            state.sort = sort;
        }
        if let Some(filters) = &self.filters {
            state.filters = filters.clone();
        }
    }
}

/// Parses a backup. Every record must deserialize, validate and carry a
/// unique id; otherwise nothing is returned.
pub fn parse_import(json: &str) -> Result<ImportPayload, FormatError> {
    let value: Value = serde_json::from_str(json)?;
    let object = value.as_object().ok_or(FormatError::MissingCandidatures)?;

    let items = object
        .get("candidatures")
        .ok_or(FormatError::MissingCandidatures)?
        .as_array()
        .ok_or(FormatError::CandidaturesNotArray)?;

    let mut records = Vec::with_capacity(items.len());
    let mut seen = HashSet::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let record: CandidatureRecord =
            serde_json::from_value(item.clone()).map_err(|e| FormatError::InvalidRecord {
                index,
                reason: e.to_string(),
            })?;
        record.validate().map_err(|e| FormatError::InvalidRecord {
            index,
            reason: e.to_string(),
        })?;
        if !seen.insert(record.id.clone()) {
            return Err(FormatError::InvalidRecord {
                index,
                reason: format!("duplicate id '{}'", record.id),
            });
        }
        records.push(record);
    }

    Ok(ImportPayload {
        records,
        view: optional_field(object, "view")?,
        sort: parse_sort(object)?,
        filters: optional_field(object, "filters")?,
    })
}

fn optional_field<T: DeserializeOwned>(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<T>, FormatError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| FormatError::InvalidViewState {
                field,
                reason: e.to_string(),
            }),
    }
}

fn parse_sort(object: &Map<String, Value>) -> Result<Option<SortSpec>, FormatError> {
    if let Some(sort) = optional_field::<SortSpec>(object, "sort")? {
        return Ok(Some(sort));
    }
    let Some(column) = optional_field::<SortColumn>(object, "sortCol")? else {
        return Ok(None);
    };
    let direction = optional_field::<SortDirection>(object, "sortDir")?.unwrap_or_default();
    Ok(Some(SortSpec::new(column, direction)))
}

/// Everything a spreadsheet or PDF writer needs. Always the full,
/// unfiltered collection in stored order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub generated_at: DateTime<Utc>,
    pub kpis: Kpis,
    pub records: Vec<CandidatureRecord>,
}

impl ExportBundle {
    pub fn new(records: &[CandidatureRecord], generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            kpis: Kpis::compute(records),
            records: records.to_vec(),
        }
    }
}

/// True when the last export is more than `stale_days` old. Never
/// exported counts as fresh.
pub fn export_is_stale(
    last_export: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    stale_days: u32,
) -> bool {
    match last_export {
        Some(at) => now.signed_duration_since(at) > Duration::days(i64::from(stale_days)),
        None => false,
    }
}
