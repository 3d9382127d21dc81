//! Filtering and sorting of the record collection.
//!
//! Every function here is pure: inputs are borrowed and never modified, and
//! identical inputs always yield identical output.

pub mod filter;
pub mod sort;

use std::collections::BTreeSet;

pub use filter::FilterSpec;
pub use sort::{SortColumn, SortDirection, SortSpec};

use crate::model::CandidatureRecord;

/// Returns the records matching `filter`, in input order.
pub fn filter_records(records: &[CandidatureRecord], filter: &FilterSpec) -> Vec<CandidatureRecord> {
    let matcher = filter.matcher();
    records
        .iter()
        .filter(|record| matcher.matches(record))
        .cloned()
        .collect()
}

/// Returns the filtered records sorted by `sort` as a new sequence.
pub fn filter_and_sort(
    records: &[CandidatureRecord],
    filter: &FilterSpec,
    sort: &SortSpec,
) -> Vec<CandidatureRecord> {
    let mut list = filter_records(records, filter);
    sort.sort(&mut list);
    list
}

/// Distinct non-empty sectors, sorted, for the sector facet.
pub fn sector_facets(records: &[CandidatureRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.sector.as_deref())
        .filter(|sector| !sector.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, RecordId, Status};

    fn record(id: &str, company: &str, sector: Option<&str>) -> CandidatureRecord {
        CandidatureRecord {
            id: RecordId::new(id),
            company: company.to_string(),
            position: "Dev".to_string(),
            location: None,
            sector: sector.map(str::to_string),
            contract_type: None,
            priority: Priority::Medium,
            status: Status::Applied,
            applied_date: None,
            link: None,
            contact_name: None,
            contact_email: None,
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn test_filter_and_sort_leaves_input_untouched() {
        let records = vec![
            record("1", "Zeta", Some("Tech")),
            record("2", "Acme", Some("Retail")),
            record("3", "Beta", Some("Tech")),
        ];
        let before = records.clone();

        let out = filter_and_sort(
            &records,
            &FilterSpec::default().sector("Tech"),
            &SortSpec::asc(SortColumn::Company),
        );

        assert_eq!(records, before);
        let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn test_sector_facets_are_distinct_and_sorted() {
        let records = vec![
            record("1", "A", Some("Tech")),
            record("2", "B", None),
            record("3", "C", Some("Finance")),
            record("4", "D", Some("Tech")),
        ];
        assert_eq!(sector_facets(&records), vec!["Finance", "Tech"]);
    }
}
