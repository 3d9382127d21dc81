use serde::Serialize;

use crate::model::{CandidatureRecord, Status};

/// Headline counters over the whole collection.
///
/// `active`, `offers`, `rejected` and `abandoned` partition `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total: usize,
    pub active: usize,
    pub interviewing: usize,
    pub offers: usize,
    pub rejected: usize,
    pub abandoned: usize,
}

impl Kpis {
    /// Counts the full, unfiltered collection.
    pub fn compute(records: &[CandidatureRecord]) -> Self {
        let mut kpis = Kpis {
            total: records.len(),
            ..Kpis::default()
        };
        for record in records {
            let status = record.status;
            if status.is_active() {
                kpis.active += 1;
            }
            if status.is_interviewing() {
                kpis.interviewing += 1;
            }
            match status {
                Status::OfferReceived => kpis.offers += 1,
                Status::Rejected => kpis.rejected += 1,
                Status::Abandoned => kpis.abandoned += 1,
                _ => {}
            }
        }
        kpis
    }
}
