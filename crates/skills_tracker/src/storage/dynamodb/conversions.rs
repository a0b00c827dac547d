//! DynamoDB attribute conversion functions.
//!
//! Pure functions between DynamoDB items and domain types. Reads go through
//! [`flatten_item`], which strips the typed attribute envelope
//! (`{"S": "x"}`, `{"SS": [..]}`) down to plain JSON before deserializing.
//! The table key is renamed to its domain field on the way in and out.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::SecondsFormat;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use skills_tracker_core::skills::{Entry, EntrySummary, Tag, TagSummary};
use skills_tracker_core::storage::RepositoryError;

use super::keys::{KeySchema, ENTRY_ID_FIELD, TAG_KEY_FIELD};

type Item = HashMap<String, AttributeValue>;

// ============================================================================
// Attribute decoding
// ============================================================================

/// Flattens one attribute value into plain JSON.
///
/// Numbers become JSON numbers when they fit, otherwise their string form.
/// Binary values become arrays of bytes.
pub fn flatten_attribute(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => parse_number(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(set.iter().map(|n| parse_number(n)).collect()),
        AttributeValue::B(blob) => bytes_to_value(blob.as_ref()),
        AttributeValue::Bs(blobs) => {
            Value::Array(blobs.iter().map(|b| bytes_to_value(b.as_ref())).collect())
        }
        AttributeValue::L(list) => Value::Array(list.iter().map(flatten_attribute).collect()),
        AttributeValue::M(map) => Value::Object(flatten_item(map)),
        _ => Value::Null,
    }
}

/// Flattens a whole item into a JSON object.
pub fn flatten_item(item: &Item) -> Map<String, Value> {
    item.iter()
        .map(|(key, value)| (key.clone(), flatten_attribute(value)))
        .collect()
}

fn parse_number(n: &str) -> Value {
    if let Ok(i) = n.parse::<i64>() {
        return Value::from(i);
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(n.to_string()))
}

fn bytes_to_value(bytes: &[u8]) -> Value {
    Value::Array(bytes.iter().map(|b| Value::from(*b)).collect())
}

fn decode<T: DeserializeOwned>(
    item: &Item,
    key_attribute: &str,
    key_field: &str,
    entity_type: &str,
) -> Result<T, RepositoryError> {
    let mut object = flatten_item(item);
    if key_attribute != key_field {
        if let Some(key) = object.remove(key_attribute) {
            object.insert(key_field.to_string(), key);
        }
    }
    serde_json::from_value(Value::Object(object))
        .map_err(|e| RepositoryError::InvalidData(format!("{entity_type}: {e}")))
}

/// Decodes a batch of items, skipping the ones that do not decode.
///
/// One malformed record must not hide the rest of a listing, so each
/// failure is logged and dropped.
pub fn decode_all<T>(
    items: &[Item],
    decode: impl Fn(&Item) -> Result<T, RepositoryError>,
) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| match decode(item) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping undecodable item");
                None
            }
        })
        .collect()
}

// ============================================================================
// Entry conversions
// ============================================================================

/// Convert an Entry to a DynamoDB item.
pub fn entry_to_item(entry: &Entry, keys: &KeySchema) -> Item {
    let mut item = HashMap::new();

    item.insert(keys.entries.clone(), AttributeValue::S(entry.id.clone()));
    item.insert("title".to_string(), AttributeValue::S(entry.title.clone()));
    item.insert(
        "description".to_string(),
        AttributeValue::S(entry.description.clone()),
    );
    // String sets cannot be empty.
    if !entry.tags.is_empty() {
        item.insert("tags".to_string(), AttributeValue::Ss(entry.tags.clone()));
    }
    if let Some(start) = entry.start_date {
        item.insert("startDate".to_string(), AttributeValue::S(start.to_string()));
    }
    if let Some(end) = entry.end_date {
        item.insert("endDate".to_string(), AttributeValue::S(end.to_string()));
    }
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(format_timestamp(entry.created_at)),
    );
    item.insert(
        "type".to_string(),
        AttributeValue::S(entry.entry_type.as_str().to_string()),
    );
    item.insert("userId".to_string(), AttributeValue::S(entry.user_id.clone()));

    item
}

/// Convert a DynamoDB item to an Entry.
pub fn item_to_entry(item: &Item, keys: &KeySchema) -> Result<Entry, RepositoryError> {
    decode(item, &keys.entries, ENTRY_ID_FIELD, "Entry")
}

/// Convert a projected DynamoDB item to an EntrySummary.
pub fn item_to_entry_summary(
    item: &Item,
    keys: &KeySchema,
) -> Result<EntrySummary, RepositoryError> {
    decode(item, &keys.entries, ENTRY_ID_FIELD, "EntrySummary")
}

// ============================================================================
// Tag conversions
// ============================================================================

/// Convert a DynamoDB item to a Tag.
pub fn item_to_tag(item: &Item, keys: &KeySchema) -> Result<Tag, RepositoryError> {
    decode(item, &keys.tags, TAG_KEY_FIELD, "Tag")
}

/// Convert a projected DynamoDB item to a TagSummary.
pub fn item_to_tag_summary(item: &Item, keys: &KeySchema) -> Result<TagSummary, RepositoryError> {
    decode(item, &keys.tags, TAG_KEY_FIELD, "TagSummary")
}

/// Timestamps are stored the way JavaScript's `toISOString` writes them.
pub fn format_timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::primitives::Blob;
    use chrono::{DateTime, NaiveDate, Utc};
    use serde_json::json;
    use skills_tracker_core::skills::EntryType;

    use super::*;

    fn s(value: &str) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }

    fn sample_entry() -> Entry {
        Entry {
            id: "550e8400-e29b-41d4-a716-446655440003".to_string(),
            title: "Wrote a DynamoDB adapter".to_string(),
            description: "Flattened attribute values".to_string(),
            tags: vec!["rust".to_string(), "dynamodb".to_string()],
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            end_date: None,
            created_at: DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            entry_type: EntryType::LogEntry,
            user_id: "U024BE7LH".to_string(),
        }
    }

    fn tag_item(key: &str) -> Item {
        HashMap::from([
            ("skill-tag-key".to_string(), s(key)),
            ("originalTag".to_string(), s(key)),
            ("createdAt".to_string(), s("2024-01-15T10:30:00.000Z")),
        ])
    }

    #[test]
    fn test_flatten_scalar_and_set_attributes() {
        let item: Item = HashMap::from([
            ("name".to_string(), s("rust")),
            (
                "entries".to_string(),
                AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]),
            ),
            ("archived".to_string(), AttributeValue::Bool(false)),
            ("count".to_string(), AttributeValue::N("42".to_string())),
            ("ratio".to_string(), AttributeValue::N("0.5".to_string())),
            ("missing".to_string(), AttributeValue::Null(true)),
        ]);

        let flat = Value::Object(flatten_item(&item));

        assert_eq!(
            flat,
            json!({
                "name": "rust",
                "entries": ["a", "b"],
                "archived": false,
                "count": 42,
                "ratio": 0.5,
                "missing": null,
            })
        );
    }

    #[test]
    fn test_flatten_nested_attributes() {
        let value = AttributeValue::M(HashMap::from([(
            "list".to_string(),
            AttributeValue::L(vec![
                AttributeValue::Ns(vec!["1".to_string(), "2".to_string()]),
                AttributeValue::B(Blob::new(vec![7u8, 8u8])),
            ]),
        )]));

        assert_eq!(flatten_attribute(&value), json!({"list": [[1, 2], [7, 8]]}));
    }

    #[test]
    fn test_flatten_oversized_number_keeps_string() {
        let huge = "1".repeat(400);
        assert_eq!(
            flatten_attribute(&AttributeValue::N(huge.clone())),
            Value::String(huge)
        );
    }

    #[test]
    fn test_entry_item_layout() {
        let item = entry_to_item(&sample_entry(), &KeySchema::default());

        assert_eq!(
            item.get("skill-entry-key").unwrap().as_s().unwrap(),
            "550e8400-e29b-41d4-a716-446655440003"
        );
        assert!(!item.contains_key("id"));
        assert_eq!(
            item.get("tags").unwrap().as_ss().unwrap(),
            &vec!["rust".to_string(), "dynamodb".to_string()]
        );
        assert_eq!(
            item.get("createdAt").unwrap().as_s().unwrap(),
            "2024-01-15T10:30:00.000Z"
        );
        assert_eq!(item.get("type").unwrap().as_s().unwrap(), "log_entry");
        assert_eq!(item.get("startDate").unwrap().as_s().unwrap(), "2024-01-15");
        assert!(!item.contains_key("endDate"));
    }

    #[test]
    fn test_entry_round_trip() {
        let keys = KeySchema::default();
        let entry = sample_entry();
        let parsed = item_to_entry(&entry_to_item(&entry, &keys), &keys).unwrap();

        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_chat_bot_entry_decodes() {
        let item: Item = HashMap::from([
            ("skill-entry-key".to_string(), s("lq2x9k3a1b")),
            ("title".to_string(), s("Paired on the parser")),
            ("description".to_string(), s("Recursive descent")),
            ("tags".to_string(), AttributeValue::Ss(vec!["Rust".to_string()])),
            ("startDate".to_string(), s("2024-01-15")),
            ("endDate".to_string(), s("")),
            ("createdAt".to_string(), s("2024-01-15T10:30:00.000Z")),
            ("type".to_string(), s("log_entry")),
            ("userId".to_string(), s("U024BE7LH")),
        ]);

        let entry = item_to_entry(&item, &KeySchema::default()).unwrap();

        assert_eq!(entry.id, "lq2x9k3a1b");
        assert_eq!(entry.entry_type, EntryType::LogEntry);
        assert_eq!(entry.start_date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(entry.end_date, None);
    }

    #[test]
    fn test_entry_summary_from_projection() {
        let item: Item = HashMap::from([
            ("skill-entry-key".to_string(), s("lq2x9k3a1b")),
            ("title".to_string(), s("Title")),
            ("createdAt".to_string(), s("2024-01-15T10:30:00.000Z")),
            ("userId".to_string(), s("U1")),
        ]);

        let summary = item_to_entry_summary(&item, &KeySchema::default()).unwrap();

        assert_eq!(summary.id, "lq2x9k3a1b");
        assert_eq!(summary.title, "Title");
        assert_eq!(summary.user_id, "U1");
    }

    #[test]
    fn test_tag_with_null_entries() {
        let keys = KeySchema::default();
        let mut item = tag_item("rust");
        item.insert("originalTag".to_string(), s("Rust"));
        item.insert("entries".to_string(), AttributeValue::Null(true));

        let tag = item_to_tag(&item, &keys).unwrap();
        assert_eq!(tag.tag, "rust");
        assert!(tag.entries.is_empty());

        let summary = item_to_tag_summary(&item, &keys).unwrap();
        assert_eq!(summary.original_tag, "Rust");
    }

    #[test]
    fn test_custom_key_names() {
        let keys = KeySchema::new("id", "tag");
        let item: Item = HashMap::from([
            ("tag".to_string(), s("rust")),
            ("originalTag".to_string(), s("Rust")),
            ("createdAt".to_string(), s("2024-01-15T10:30:00.000Z")),
        ]);

        assert_eq!(item_to_tag_summary(&item, &keys).unwrap().tag, "rust");
    }

    #[test]
    fn test_missing_field_is_invalid_data() {
        let item: Item = HashMap::from([("skill-tag-key".to_string(), s("rust"))]);

        let result = item_to_tag(&item, &KeySchema::default());

        assert!(matches!(result, Err(RepositoryError::InvalidData(msg)) if msg.starts_with("Tag:")));
    }

    #[test]
    fn test_decode_all_skips_bad_items() {
        let keys = KeySchema::default();
        let mut broken = tag_item("broken");
        broken.remove("createdAt");
        let items = vec![tag_item("alpha"), broken, tag_item("bravo")];

        let tags = decode_all(&items, |item| item_to_tag_summary(item, &keys));

        let names: Vec<&str> = tags.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(names, vec!["alpha", "bravo"]);
    }
}
