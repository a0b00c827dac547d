//! Tag normalization.
//!
//! Tags arrive as one comma-delimited string (`"Rust,axum, Tokio"`). Each
//! piece is stripped of every non-word character, which also removes
//! surrounding whitespace, and keyed by its lower-cased form.

use serde::Serialize;

/// A single tag after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTag {
    /// Lower-cased key used as the tags table partition key.
    pub key: String,
    /// The stripped tag with its original casing.
    pub original: String,
}

/// Word characters match the `\w` class: ASCII letters, digits and `_`.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Normalizes one raw tag. Returns None if nothing is left after stripping.
pub fn normalize_tag(raw: &str) -> Option<NormalizedTag> {
    let original: String = raw.chars().filter(|c| is_word_char(*c)).collect();
    if original.is_empty() {
        return None;
    }

    Some(NormalizedTag {
        key: original.to_ascii_lowercase(),
        original,
    })
}

/// Splits a comma-delimited tag string into normalized tags.
///
/// Pieces that normalize to nothing are dropped and repeated keys keep
/// their first occurrence, so the result is safe to store as a string set.
///
/// # Examples
///
/// ```
/// use skills_tracker_core::skills::split_tags;
///
/// let tags = split_tags("Rust, rust ,New-Tag,,");
/// let keys: Vec<&str> = tags.iter().map(|t| t.key.as_str()).collect();
/// assert_eq!(keys, vec!["rust", "newtag"]);
/// assert_eq!(tags[1].original, "NewTag");
/// ```
pub fn split_tags(input: &str) -> Vec<NormalizedTag> {
    let mut tags: Vec<NormalizedTag> = Vec::new();

    for tag in input.split(',').filter_map(normalize_tag) {
        if !tags.iter().any(|existing| existing.key == tag.key) {
            tags.push(tag);
        }
    }

    tags
}

/// Splits a comma-delimited tag string into lower-cased tag keys.
pub fn tag_keys(input: &str) -> Vec<String> {
    split_tags(input).into_iter().map(|t| t.key).collect()
}
