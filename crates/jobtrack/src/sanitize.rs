//! Helpers for sanitizing record data before it enters log lines and spans.
//!
//! Contact details stay out of logs: emails are masked and links lose
//! their credentials and query strings.

use crate::model::CandidatureRecord;

/// Masks the local part of an email address.
///
/// - `jane.doe@acme.com` → `j***@acme.com`
/// - `not-an-email` → `***`
pub fn redact_email(email: &str) -> String {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

/// Strips userinfo, query string and fragment from a posting URL.
///
/// - `https://user:pw@jobs.example.com/p/42?ref=mail` → `https://****@jobs.example.com/p/42`
/// - `https://jobs.example.com/p/42` → unchanged
pub fn redact_link(url: &str) -> String {
    let url = url.trim();
    let end = url.find(|c: char| c == '?' || c == '#').unwrap_or(url.len());
    let url = &url[..end];

    if let Some(scheme_end) = url.find("://") {
        let after_scheme = &url[scheme_end + 3..];
        let authority_end = after_scheme.find('/').unwrap_or(after_scheme.len());
        if let Some(at_pos) = after_scheme[..authority_end].find('@') {
            let scheme = &url[..scheme_end + 3];
            let after_at = &after_scheme[at_pos + 1..];
            return format!("{}****@{}", scheme, after_at);
        }
    }

    url.to_string()
}

/// Short label for log lines: company, position and id. Never includes
/// contact details or notes.
pub fn record_label(record: &CandidatureRecord) -> String {
    format!("{} / {} [{}]", record.company, record.position, record.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewRecord, RecordId};
    use chrono::Utc;

    #[test]
    fn test_redact_email() {
        assert_eq!(redact_email("jane.doe@acme.com"), "j***@acme.com");
        assert_eq!(redact_email(" a@b.fr "), "a***@b.fr");
    }

    #[test]
    fn test_redact_email_malformed() {
        assert_eq!(redact_email("not-an-email"), "***");
        assert_eq!(redact_email("@acme.com"), "***");
        assert_eq!(redact_email(""), "***");
    }

    #[test]
    fn test_redact_link_with_credentials_and_query() {
        assert_eq!(
            redact_link("https://user:pw@jobs.example.com/p/42?ref=mail#apply"),
            "https://****@jobs.example.com/p/42"
        );
    }

    #[test]
    fn test_redact_link_plain() {
        assert_eq!(
            redact_link("https://jobs.example.com/p/42"),
            "https://jobs.example.com/p/42"
        );
        assert_eq!(
            redact_link("https://jobs.example.com/p/42?token=abc"),
            "https://jobs.example.com/p/42"
        );
    }

    #[test]
    fn test_redact_link_at_in_path_is_kept() {
        assert_eq!(
            redact_link("https://example.com/@acme/jobs"),
            "https://example.com/@acme/jobs"
        );
    }

    #[test]
    fn test_record_label_omits_contact() {
        let mut fields = NewRecord::new("Acme", "Dev");
        fields.contact_email = Some("jane@acme.com".to_string());
        let record = fields.into_record(RecordId::new("r1"), Utc::now()).unwrap();
        let label = record_label(&record);
        assert_eq!(label, "Acme / Dev [r1]");
        assert!(!label.contains("jane"));
    }
}
