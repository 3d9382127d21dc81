//! Canonical, ordered record collection.
//!
//! The store only enforces collection invariants (unique ids, valid
//! records). Persistence and recomputation are driven by the tracker.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::model::{CandidatureRecord, RecordId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<CandidatureRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from existing records, validating each one.
    pub fn from_records(records: Vec<CandidatureRecord>) -> Result<Self, ValidationError> {
        check_collection(&records)?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[CandidatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&CandidatureRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &RecordId) -> Option<&mut CandidatureRecord> {
        self.records.iter_mut().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    /// Inserts at the front so the newest record comes first.
    pub fn insert_front(&mut self, record: CandidatureRecord) -> Result<(), ValidationError> {
        record.validate()?;
        if self.contains(&record.id) {
            return Err(ValidationError::DuplicateId(record.id));
        }
        self.records.insert(0, record);
        Ok(())
    }

    pub fn remove(&mut self, id: &RecordId) -> Option<CandidatureRecord> {
        let index = self.records.iter().position(|r| &r.id == id)?;
        Some(self.records.remove(index))
    }

    /// Swaps in a whole new collection. On error nothing changes.
    pub fn replace_all(&mut self, records: Vec<CandidatureRecord>) -> Result<(), ValidationError> {
        check_collection(&records)?;
        self.records = records;
        Ok(())
    }
}

fn check_collection(records: &[CandidatureRecord]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        record.validate()?;
        if !seen.insert(&record.id) {
            return Err(ValidationError::DuplicateId(record.id.clone()));
        }
    }
    Ok(())
}
