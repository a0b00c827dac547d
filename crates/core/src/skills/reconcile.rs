//! Tag reconciliation after an entry is created.
//!
//! Every tag key on a new entry must end up pointing back at that entry.
//! A missing tag record is created with the original casing and creation
//! time; an existing one gets the entry id added to its set. Adding an id
//! that is already present is a no-op.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::tags::NormalizedTag;
use super::types::Tag;

/// What an upsert did to the tag record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TagUpsertOutcome {
    Created,
    Updated,
}

/// Applies the upsert to an in-memory tag record.
///
/// Storage backends that cannot express the upsert as one atomic write
/// must call this while holding exclusive access to the record.
pub fn upsert_tag(
    existing: Option<Tag>,
    tag: &NormalizedTag,
    entry_id: &str,
    now: DateTime<Utc>,
) -> (Tag, TagUpsertOutcome) {
    match existing {
        Some(mut record) => {
            if !record.entries.iter().any(|id| id == entry_id) {
                record.entries.push(entry_id.to_string());
            }
            (record, TagUpsertOutcome::Updated)
        }
        None => (
            Tag {
                tag: tag.key.clone(),
                original_tag: tag.original.clone(),
                created_at: now,
                entries: vec![entry_id.to_string()],
            },
            TagUpsertOutcome::Created,
        ),
    }
}

/// Summary of reconciling all tags of one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub created_tags: Vec<String>,
    pub updated_tags: Vec<String>,
    pub failed_tags: Vec<String>,
}

impl ReconcileReport {
    /// Builds a report from per-tag results, keeping input order.
    pub fn from_results<E>(
        results: impl IntoIterator<Item = (String, Result<TagUpsertOutcome, E>)>,
    ) -> Self {
        let mut report = Self::default();
        for (key, result) in results {
            match result {
                Ok(TagUpsertOutcome::Created) => report.created_tags.push(key),
                Ok(TagUpsertOutcome::Updated) => report.updated_tags.push(key),
                Err(_) => report.failed_tags.push(key),
            }
        }
        report
    }

    /// True when every tag was linked to the entry.
    pub fn is_complete(&self) -> bool {
        self.failed_tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rust_tag() -> NormalizedTag {
        NormalizedTag {
            key: "rust".to_string(),
            original: "Rust".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_missing_tag_is_created_with_single_entry() {
        let entry_id = "e-1";

        let (tag, outcome) = upsert_tag(None, &rust_tag(), entry_id, now());

        assert_eq!(outcome, TagUpsertOutcome::Created);
        assert_eq!(tag.tag, "rust");
        assert_eq!(tag.original_tag, "Rust");
        assert_eq!(tag.created_at, now());
        assert_eq!(tag.entries, vec![entry_id]);
    }

    #[test]
    fn test_existing_tag_keeps_casing_and_appends_entry() {
        let first = "e-1";
        let second = "e-2";
        let (existing, _) = upsert_tag(None, &rust_tag(), first, now());

        let other_casing = NormalizedTag {
            key: "rust".to_string(),
            original: "RUST".to_string(),
        };
        let later = now() + chrono::Duration::days(1);
        let (tag, outcome) = upsert_tag(Some(existing), &other_casing, second, later);

        assert_eq!(outcome, TagUpsertOutcome::Updated);
        assert_eq!(tag.original_tag, "Rust");
        assert_eq!(tag.created_at, now());
        assert_eq!(tag.entries, vec![first, second]);
    }

    #[test]
    fn test_repeated_entry_is_not_duplicated() {
        let entry_id = "e-1";
        let (existing, _) = upsert_tag(None, &rust_tag(), entry_id, now());

        let (tag, _) = upsert_tag(Some(existing), &rust_tag(), entry_id, now());

        assert_eq!(tag.entries, vec![entry_id]);
    }

    #[test]
    fn test_report_buckets_results() {
        let results: Vec<(String, Result<TagUpsertOutcome, String>)> = vec![
            ("rust".to_string(), Ok(TagUpsertOutcome::Created)),
            ("axum".to_string(), Err("throttled".to_string())),
            ("tokio".to_string(), Ok(TagUpsertOutcome::Updated)),
        ];

        let report = ReconcileReport::from_results(results);

        assert_eq!(report.created_tags, vec!["rust"]);
        assert_eq!(report.updated_tags, vec!["tokio"]);
        assert_eq!(report.failed_tags, vec!["axum"]);
        assert!(!report.is_complete());
    }
}
