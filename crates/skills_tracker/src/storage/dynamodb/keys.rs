//! Table key names and key builders.
//!
//! The partition key attribute names are configurable so the service can
//! run against the chat-bot's existing tables. Items are decoded with the
//! key renamed to `id` (entries) or `tag` (tags).

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

type Item = HashMap<String, AttributeValue>;

/// Default partition key attribute of the entries table.
pub const DEFAULT_ENTRIES_KEY: &str = "skill-entry-key";

/// Default partition key attribute of the tags table.
pub const DEFAULT_TAGS_KEY: &str = "skill-tag-key";

/// Field an entry's key is exposed under once decoded.
pub const ENTRY_ID_FIELD: &str = "id";

/// Field a tag's key is exposed under once decoded.
pub const TAG_KEY_FIELD: &str = "tag";

/// Partition key attribute names of both tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    pub entries: String,
    pub tags: String,
}

impl Default for KeySchema {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRIES_KEY, DEFAULT_TAGS_KEY)
    }
}

impl KeySchema {
    pub fn new(entries: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            entries: entries.into(),
            tags: tags.into(),
        }
    }

    /// Primary key map for an entry.
    pub fn entry_key(&self, id: &str) -> Item {
        HashMap::from([(self.entries.clone(), AttributeValue::S(id.to_string()))])
    }

    /// Primary key map for a tag.
    pub fn tag_key(&self, key: &str) -> Item {
        HashMap::from([(self.tags.clone(), AttributeValue::S(key.to_string()))])
    }

    /// Reads the tag key out of a `LastEvaluatedKey` map.
    pub fn tag_cursor(&self, key: &Item) -> Option<String> {
        key.get(&self.tags)
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
    }
}
