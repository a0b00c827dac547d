use super::types::Tag;

/// Collects entry ids referenced by the given tags, without repeats,
/// in first-seen order.
pub fn unique_entry_ids(tags: &[Tag]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in tags.iter().flat_map(|tag| tag.entries.iter()) {
        if !id.is_empty() && !ids.contains(id) {
            ids.push(id.clone());
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn tag(key: &str, entries: &[&str]) -> Tag {
        Tag {
            tag: key.to_string(),
            original_tag: key.to_string(),
            created_at: Utc::now(),
            entries: entries.iter().map(|id| id.to_string()).collect(),
        }
    }

    #[test]
    fn test_no_tags_no_ids() {
        assert!(unique_entry_ids(&[]).is_empty());
    }

    #[test]
    fn test_shared_entries_are_deduplicated_in_order() {
        let tags = vec![tag("rust", &["a1", "b2"]), tag("axum", &["b2", "c3"])];

        assert_eq!(unique_entry_ids(&tags), vec!["a1", "b2", "c3"]);
    }

    #[test]
    fn test_tags_without_entries_contribute_nothing() {
        let tags = vec![tag("empty", &[]), tag("rust", &["", "a1"])];

        assert_eq!(unique_entry_ids(&tags), vec!["a1"]);
    }
}
