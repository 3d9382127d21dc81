use serde::Serialize;

use crate::model::{CandidatureRecord, Status};

/// One board column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanColumn {
    pub status: Status,
    pub records: Vec<CandidatureRecord>,
}

/// The eight status columns in stage order. Empty columns are kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanBoard {
    pub columns: Vec<KanbanColumn>,
}

impl KanbanBoard {
    /// Partitions an already filtered list. Within a column records keep
    /// their order in `list`.
    pub fn project(list: &[CandidatureRecord]) -> Self {
        let mut columns: Vec<KanbanColumn> = Status::ALL
            .into_iter()
            .map(|status| KanbanColumn {
                status,
                records: Vec::new(),
            })
            .collect();

        for record in list {
            columns[record.status.index()].records.push(record.clone());
        }

        Self { columns }
    }

    pub fn column(&self, status: Status) -> &KanbanColumn {
        &self.columns[status.index()]
    }

    /// Number of cards across all columns.
    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of moving a card to another column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub id: crate::model::RecordId,
    pub company: String,
    pub from: Status,
    pub to: Status,
}
