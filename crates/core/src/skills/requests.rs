//! API request types for the skills tracker endpoints.
//!
//! Following the Functional Core pattern, these are pure data types; the
//! server deserializes them from JSON bodies and query strings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_optional_date, deserialize_optional_string};

use super::error::EntryError;
use super::tags::{split_tags, NormalizedTag};
use super::types::{Entry, EntryType};

/// Page size used by `GET /tags` when none (or garbage) is given.
pub const DEFAULT_TAGS_PAGE_SIZE: usize = 5;

/// Upper bound on `GET /tags` page size.
pub const MAX_TAGS_PAGE_SIZE: usize = 100;

const MAX_TITLE_LENGTH: usize = 200;

/// Request payload for `POST /createEntry`.
///
/// Every field is optional at the parsing layer so a missing field becomes
/// a validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    /// Comma-delimited tags, e.g. `"Rust,axum,tokio"`.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub tags: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<NaiveDate>,
}

/// A validated entry together with the tags it must be linked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedEntry {
    pub entry: Entry,
    pub tags: Vec<NormalizedTag>,
}

impl CreateEntryRequest {
    /// Validates the request and builds the entry to store.
    pub fn into_entry(
        self,
        id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<PreparedEntry, EntryError> {
        let title = self.title.ok_or(EntryError::MissingField("title"))?;
        let description = self
            .description
            .ok_or(EntryError::MissingField("description"))?;
        let raw_tags = self.tags.ok_or(EntryError::MissingField("tags"))?;
        let user_id = self.user_id.ok_or(EntryError::MissingField("userId"))?;

        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(EntryError::TitleTooLong);
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(EntryError::InvalidDateRange);
            }
        }

        let tags = split_tags(&raw_tags);
        if tags.is_empty() {
            return Err(EntryError::NoUsableTags(raw_tags));
        }

        let entry = Entry {
            id: id.into(),
            title: title.trim().to_string(),
            description,
            tags: tags.iter().map(|t| t.key.clone()).collect(),
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: now,
            entry_type: EntryType::LogEntry,
            user_id: user_id.trim().to_string(),
        };

        Ok(PreparedEntry { entry, tags })
    }
}

/// Query parameters for `GET /items`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub user_id: Option<String>,
}

/// Query parameters for `GET /tags`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTagsQuery {
    /// Exclusive start key: the last tag key of the previous page.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub after: Option<String>,
    /// Accepted for client compatibility; backward paging is not supported.
    #[serde(default)]
    pub before: Option<String>,
    /// Raw page size, parsed leniently by [`resolve_page_size`].
    #[serde(default)]
    pub size: Option<String>,
}

/// Query parameters for `GET /search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub tags: Option<String>,
}

/// Resolves the requested page size.
///
/// Anything that is not a positive integer falls back to `default`, and
/// the result never exceeds [`MAX_TAGS_PAGE_SIZE`].
pub fn resolve_page_size(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|size| *size > 0)
        .unwrap_or(default)
        .min(MAX_TAGS_PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CreateEntryRequest {
        CreateEntryRequest {
            title: Some("Shipped the tags endpoint".to_string()),
            description: Some("Cursor pagination over a scan".to_string()),
            tags: Some("Rust, DynamoDB".to_string()),
            user_id: Some("U024BE7LH".to_string()),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 3),
        }
    }

    #[test]
    fn test_into_entry_builds_lowercase_tag_keys() {
        let id = "e-1";
        let now = Utc::now();

        let prepared = full_request().into_entry(id, now).unwrap();

        assert_eq!(prepared.entry.id, id);
        assert_eq!(prepared.entry.created_at, now);
        assert_eq!(prepared.entry.tags, vec!["rust", "dynamodb"]);
        assert_eq!(prepared.entry.entry_type, EntryType::LogEntry);
        assert_eq!(prepared.tags[1].original, "DynamoDB");
    }

    #[test]
    fn test_missing_fields_are_reported_in_order() {
        let request = CreateEntryRequest {
            title: None,
            ..full_request()
        };
        assert_eq!(
            request.into_entry("e-1", Utc::now()),
            Err(EntryError::MissingField("title"))
        );

        let request = CreateEntryRequest {
            user_id: None,
            ..full_request()
        };
        assert_eq!(
            request.into_entry("e-1", Utc::now()),
            Err(EntryError::MissingField("userId"))
        );
    }

    #[test]
    fn test_blank_fields_deserialize_as_missing() {
        let json = r#"{"title": "t", "description": "  ", "tags": "rust", "userId": "U1"}"#;
        let request: CreateEntryRequest = serde_json::from_str(json).unwrap();

        assert_eq!(
            request.into_entry("e-1", Utc::now()),
            Err(EntryError::MissingField("description"))
        );
    }

    #[test]
    fn test_tags_that_strip_to_nothing_are_rejected() {
        let request = CreateEntryRequest {
            tags: Some("--, !!".to_string()),
            ..full_request()
        };

        assert!(matches!(
            request.into_entry("e-1", Utc::now()),
            Err(EntryError::NoUsableTags(_))
        ));
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let request = CreateEntryRequest {
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..full_request()
        };

        assert_eq!(
            request.into_entry("e-1", Utc::now()),
            Err(EntryError::InvalidDateRange)
        );
    }

    #[test]
    fn test_title_too_long_is_rejected() {
        let request = CreateEntryRequest {
            title: Some("x".repeat(201)),
            ..full_request()
        };

        assert_eq!(
            request.into_entry("e-1", Utc::now()),
            Err(EntryError::TitleTooLong)
        );
    }

    #[test]
    fn test_resolve_page_size() {
        assert_eq!(resolve_page_size(None, 5), 5);
        assert_eq!(resolve_page_size(Some("12"), 5), 12);
        assert_eq!(resolve_page_size(Some("abc"), 5), 5);
        assert_eq!(resolve_page_size(Some("0"), 5), 5);
        assert_eq!(resolve_page_size(Some("-3"), 5), 5);
        assert_eq!(resolve_page_size(Some("5000"), 5), MAX_TAGS_PAGE_SIZE);
    }

    #[test]
    fn test_list_items_query_empty_user_is_none() {
        let query: ListItemsQuery = serde_json::from_str(r#"{"userId": ""}"#).unwrap();
        assert_eq!(query.user_id, None);
    }
}
