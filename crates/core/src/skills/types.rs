use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use crate::serde::{deserialize_null_as_default, deserialize_optional_date};

/// Kind of record stored in the entries table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    #[default]
    #[serde(rename = "log_entry")]
    LogEntry,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::LogEntry => "log_entry",
        }
    }
}

/// A skill log entry written by a chat-bot user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Opaque id. New entries get a UUID v4; older records use short hex ids.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Lower-cased tag keys, each pointing at a record in the tags table.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub tags: Vec<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub entry_type: EntryType,
    pub user_id: String,
}

/// The projected subset of an entry returned by tag search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

impl From<&Entry> for EntrySummary {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            created_at: entry.created_at,
            user_id: entry.user_id.clone(),
        }
    }
}

/// A tag record and the entries that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Lower-cased key, unique across the tags table.
    pub tag: String,
    /// Casing of the first entry that introduced this tag.
    pub original_tag: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub entries: Vec<String>,
}

/// A tag as listed by the paginated tags endpoint (no entry ids).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSummary {
    pub tag: String,
    pub original_tag: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Tag> for TagSummary {
    fn from(tag: &Tag) -> Self {
        Self {
            tag: tag.tag.clone(),
            original_tag: tag.original_tag.clone(),
            created_at: tag.created_at,
        }
    }
}
