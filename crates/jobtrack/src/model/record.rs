//! The candidature record and the typed inputs that create and edit it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::status::{Priority, Status};
use crate::error::ValidationError;

/// Opaque, immutable record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Deserializes an optional field, treating blank strings as absent.
///
/// Stored backups write `""` for every optional field left empty in the form.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// One tracked job application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatureRecord {
    pub id: RecordId,
    pub company: String,
    pub position: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    /// Contract type, e.g. "Stage".
    #[serde(
        rename = "type",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub contract_type: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Set once by the gateway. Older imports may lack it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CandidatureRecord {
    /// Checks the invariants a stored record must satisfy.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("id", self.id.as_str())?;
        require("company", &self.company)?;
        require("position", &self.position)?;
        Ok(())
    }

    /// Date the record is filed under on the timeline: the application date,
    /// else the UTC creation day.
    pub fn effective_date(&self) -> Option<NaiveDate> {
        self.applied_date
            .or_else(|| self.created_at.map(|ts| ts.date_naive()))
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::BlankField { field })
    } else {
        Ok(())
    }
}

/// Normalizes free text: trimmed, with blank collapsing to `None`.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fields supplied when creating a candidature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewRecord {
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub sector: Option<String>,
    pub contract_type: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub applied_date: Option<NaiveDate>,
    pub link: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
}

impl NewRecord {
    pub fn new(company: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            position: position.into(),
            ..Self::default()
        }
    }

    /// Validates and stamps the fields into a full record.
    pub fn into_record(
        self,
        id: RecordId,
        created_at: DateTime<Utc>,
    ) -> Result<CandidatureRecord, ValidationError> {
        let company = self.company.trim().to_string();
        let position = self.position.trim().to_string();
        require("company", &company)?;
        require("position", &position)?;

        Ok(CandidatureRecord {
            id,
            company,
            position,
            location: clean(self.location),
            sector: clean(self.sector),
            contract_type: clean(self.contract_type),
            priority: self.priority,
            status: self.status,
            applied_date: self.applied_date,
            link: clean(self.link),
            contact_name: clean(self.contact_name),
            contact_email: clean(self.contact_email),
            notes: clean(self.notes),
            created_at: Some(created_at),
        })
    }
}

/// A typed edit. Each `Some` field overwrites the stored value; `None`
/// leaves it untouched.
///
/// For optional text fields a blank string clears the stored value. The
/// application date uses `Some(None)` to clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub sector: Option<String>,
    pub contract_type: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub applied_date: Option<Option<NaiveDate>>,
    pub link: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
}

impl RecordPatch {
    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn applied_date(mut self, date: Option<NaiveDate>) -> Self {
        self.applied_date = Some(date);
        self
    }

    /// Names of the fields this patch touches, for log lines.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        let mut mark = |set: bool, name: &'static str| {
            if set {
                fields.push(name);
            }
        };
        mark(self.company.is_some(), "company");
        mark(self.position.is_some(), "position");
        mark(self.location.is_some(), "location");
        mark(self.sector.is_some(), "sector");
        mark(self.contract_type.is_some(), "type");
        mark(self.priority.is_some(), "priority");
        mark(self.status.is_some(), "status");
        mark(self.applied_date.is_some(), "appliedDate");
        mark(self.link.is_some(), "link");
        mark(self.contact_name.is_some(), "contactName");
        mark(self.contact_email.is_some(), "contactEmail");
        mark(self.notes.is_some(), "notes");
        fields
    }

    /// Rejects patches that would blank a required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(company) = &self.company {
            require("company", company)?;
        }
        if let Some(position) = &self.position {
            require("position", position)?;
        }
        Ok(())
    }

    /// Applies the patch field by field. `id` and `created_at` are never
    /// touched. Call [`RecordPatch::validate`] first.
    pub fn apply_to(self, record: &mut CandidatureRecord) {
        if let Some(company) = self.company {
            record.company = company.trim().to_string();
        }
        if let Some(position) = self.position {
            record.position = position.trim().to_string();
        }
        if let Some(location) = self.location {
            record.location = clean(Some(location));
        }
        if let Some(sector) = self.sector {
            record.sector = clean(Some(sector));
        }
        if let Some(contract_type) = self.contract_type {
            record.contract_type = clean(Some(contract_type));
        }
        if let Some(priority) = self.priority {
            record.priority = priority;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(applied_date) = self.applied_date {
            record.applied_date = applied_date;
        }
        if let Some(link) = self.link {
            record.link = clean(Some(link));
        }
        if let Some(contact_name) = self.contact_name {
            record.contact_name = clean(Some(contact_name));
        }
        if let Some(contact_email) = self.contact_email {
            record.contact_email = clean(Some(contact_email));
        }
        if let Some(notes) = self.notes {
            record.notes = clean(Some(notes));
        }
    }
}
