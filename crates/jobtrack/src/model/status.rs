//! Ordered enumerations for pipeline stage and priority.
//!
//! Both enums serialize to the labels stored by existing backups and parse
//! from either those labels or their English variant names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Stage of a candidature, in board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Status {
    ToApply,
    Applied,
    FollowUp,
    Interview,
    TechnicalTest,
    OfferReceived,
    Rejected,
    Abandoned,
}

impl Status {
    /// All stages in kanban column order.
    pub const ALL: [Status; 8] = [
        Status::ToApply,
        Status::Applied,
        Status::FollowUp,
        Status::Interview,
        Status::TechnicalTest,
        Status::OfferReceived,
        Status::Rejected,
        Status::Abandoned,
    ];

    /// Position in the fixed stage order.
    pub fn index(self) -> usize {
        match self {
            Status::ToApply => 0,
            Status::Applied => 1,
            Status::FollowUp => 2,
            Status::Interview => 3,
            Status::TechnicalTest => 4,
            Status::OfferReceived => 5,
            Status::Rejected => 6,
            Status::Abandoned => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::ToApply => "À postuler",
            Status::Applied => "Postulé",
            Status::FollowUp => "Relance",
            Status::Interview => "Entretien",
            Status::TechnicalTest => "Test technique",
            Status::OfferReceived => "Offre reçue",
            Status::Rejected => "Refusé",
            Status::Abandoned => "Abandonné",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Status::ToApply => "ToApply",
            Status::Applied => "Applied",
            Status::FollowUp => "FollowUp",
            Status::Interview => "Interview",
            Status::TechnicalTest => "TechnicalTest",
            Status::OfferReceived => "OfferReceived",
            Status::Rejected => "Rejected",
            Status::Abandoned => "Abandoned",
        }
    }

    /// Still in progress: not rejected, abandoned or concluded by an offer.
    pub fn is_active(self) -> bool {
        !matches!(
            self,
            Status::Rejected | Status::Abandoned | Status::OfferReceived
        )
    }

    pub fn is_interviewing(self) -> bool {
        matches!(self, Status::Interview | Status::TechnicalTest)
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Applied
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Status::ALL
            .into_iter()
            .find(|status| {
                status.label() == trimmed || status.name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "status",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Status {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Status> for &'static str {
    fn from(status: Status) -> Self {
        status.label()
    }
}

/// Priority of a candidature, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn index(self) -> usize {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "Haute",
            Priority::Medium => "Moyenne",
            Priority::Low => "Basse",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Priority::ALL
            .into_iter()
            .find(|p| p.label() == trimmed || p.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "priority",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Priority {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Priority> for &'static str {
    fn from(priority: Priority) -> Self {
        priority.label()
    }
}
