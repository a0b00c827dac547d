//! In-memory repository implementation.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use skills_tracker_core::skills::{
    upsert_tag, Entry, EntrySummary, NormalizedTag, Tag, TagSummary, TagUpsertOutcome,
};
use skills_tracker_core::storage::{
    EntryRepository, Page, PageRequest, RepositoryError, Result, TagRepository,
};

/// In-memory storage backend for tests and local runs.
///
/// Uses maps wrapped in `Arc<RwLock<_>>` for thread-safe access. Tags are
/// kept in key order so paging behaves like a stable scan. Data is lost
/// when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    tags: Arc<RwLock<BTreeMap<String, Tag>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryRepository for InMemoryRepository {
    async fn create_entry(&self, entry: &Entry) -> Result<()> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&entry.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Entry",
                id: entry.id.clone(),
            });
        }
        entries.insert(entry.id.clone(), entry.clone());
        Ok(())
    }

    async fn list_entries(&self, user_id: Option<&str>) -> Result<Vec<Entry>> {
        let entries = self.entries.read().await;
        let mut result: Vec<Entry> = entries
            .values()
            .filter(|e| user_id.is_none_or(|user_id| e.user_id == user_id))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn get_entry_summaries(&self, ids: &[String]) -> Result<Vec<EntrySummary>> {
        let entries = self.entries.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| entries.get(id))
            .map(EntrySummary::from)
            .collect())
    }
}

#[async_trait]
impl TagRepository for InMemoryRepository {
    async fn upsert_tag(
        &self,
        tag: &NormalizedTag,
        entry_id: &str,
        now: DateTime<Utc>,
    ) -> Result<TagUpsertOutcome> {
        let mut tags = self.tags.write().await;
        let existing = tags.remove(&tag.key);
        let (record, outcome) = upsert_tag(existing, tag, entry_id, now);
        tags.insert(record.tag.clone(), record);
        Ok(outcome)
    }

    async fn list_tags(&self, page: &PageRequest) -> Result<Page<TagSummary>> {
        let tags = self.tags.read().await;
        let lower = match &page.after {
            Some(after) => Bound::Excluded(after.clone()),
            None => Bound::Unbounded,
        };

        let mut remaining = tags.range((lower, Bound::Unbounded));
        let items: Vec<TagSummary> = remaining
            .by_ref()
            .take(page.limit)
            .map(|(_, tag)| TagSummary::from(tag))
            .collect();

        let next_cursor = if remaining.next().is_some() {
            items.last().map(|tag| tag.tag.clone())
        } else {
            None
        };

        Ok(Page { items, next_cursor })
    }

    async fn count_tags(&self) -> Result<usize> {
        Ok(self.tags.read().await.len())
    }

    async fn get_tags(&self, keys: &[String]) -> Result<Vec<Tag>> {
        let tags = self.tags.read().await;
        Ok(keys.iter().filter_map(|key| tags.get(key)).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use futures_util::future::join_all;
    use skills_tracker_core::skills::{split_tags, EntryType};

    use uuid::Uuid;

    use super::*;

    fn entry(user_id: &str, title: &str) -> Entry {
        Entry {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: "description".to_string(),
            tags: vec!["rust".to_string()],
            start_date: None,
            end_date: None,
            created_at: Utc::now(),
            entry_type: EntryType::LogEntry,
            user_id: user_id.to_string(),
        }
    }

    fn normalized(raw: &str) -> NormalizedTag {
        split_tags(raw).remove(0)
    }

    #[tokio::test]
    async fn test_create_entry_twice_conflicts() {
        let repo = InMemoryRepository::new();
        let entry = entry("U1", "first");

        repo.create_entry(&entry).await.unwrap();
        let result = repo.create_entry(&entry).await;

        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_entries_filters_by_user() {
        let repo = InMemoryRepository::new();
        repo.create_entry(&entry("U1", "a")).await.unwrap();
        repo.create_entry(&entry("U2", "b")).await.unwrap();
        repo.create_entry(&entry("U1", "c")).await.unwrap();

        assert_eq!(repo.list_entries(None).await.unwrap().len(), 3);

        let mine = repo.list_entries(Some("U1")).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|e| e.user_id == "U1"));

        assert!(repo.list_entries(Some("U9")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_entry_summaries_skips_unknown_ids() {
        let repo = InMemoryRepository::new();
        let known = entry("U1", "known");
        repo.create_entry(&known).await.unwrap();

        let summaries = repo
            .get_entry_summaries(&["missing".to_string(), known.id.clone()])
            .await
            .unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].title, "known");
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let repo = InMemoryRepository::new();
        let first = "e-1";
        let second = "e-2";

        let created = repo
            .upsert_tag(&normalized("Rust"), first, Utc::now())
            .await
            .unwrap();
        let updated = repo
            .upsert_tag(&normalized("RUST"), second, Utc::now())
            .await
            .unwrap();

        assert_eq!(created, TagUpsertOutcome::Created);
        assert_eq!(updated, TagUpsertOutcome::Updated);

        let tags = repo.get_tags(&["rust".to_string()]).await.unwrap();
        assert_eq!(tags[0].original_tag, "Rust");
        assert_eq!(tags[0].entries, vec![first, second]);
    }

    #[tokio::test]
    async fn test_concurrent_upserts_keep_every_entry() {
        let repo = InMemoryRepository::new();
        let tag = normalized("tokio");
        let ids: Vec<String> = (0..25).map(|i| format!("e-{i}")).collect();

        join_all(ids.iter().map(|id| repo.upsert_tag(&tag, id, Utc::now()))).await;

        let tags = repo.get_tags(&["tokio".to_string()]).await.unwrap();
        assert_eq!(tags[0].entries.len(), ids.len());
        assert!(ids.iter().all(|id| tags[0].entries.contains(id)));
    }

    #[tokio::test]
    async fn test_list_tags_pages_in_key_order() {
        let repo = InMemoryRepository::new();
        for raw in ["delta", "alpha", "charlie", "bravo"] {
            repo.upsert_tag(&normalized(raw), "e-1", Utc::now())
                .await
                .unwrap();
        }

        let first = repo.list_tags(&PageRequest::new(3)).await.unwrap();
        let keys: Vec<&str> = first.items.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "bravo", "charlie"]);
        assert_eq!(first.next_cursor.as_deref(), Some("charlie"));

        let second = repo
            .list_tags(&PageRequest::new(3).after("charlie"))
            .await
            .unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].tag, "delta");
        assert!(!second.has_more());

        assert_eq!(repo.count_tags().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_exact_page_has_no_cursor() {
        let repo = InMemoryRepository::new();
        for raw in ["alpha", "bravo"] {
            repo.upsert_tag(&normalized(raw), "e-1", Utc::now())
                .await
                .unwrap();
        }

        let page = repo.list_tags(&PageRequest::new(2)).await.unwrap();

        assert_eq!(page.items.len(), 2);
        assert!(!page.has_more());
    }

    #[tokio::test]
    async fn test_get_tags_keeps_request_order() {
        let repo = InMemoryRepository::new();
        for raw in ["alpha", "bravo"] {
            repo.upsert_tag(&normalized(raw), "e-1", Utc::now())
                .await
                .unwrap();
        }

        let tags = repo
            .get_tags(&["bravo".to_string(), "zulu".to_string(), "alpha".to_string()])
            .await
            .unwrap();

        let keys: Vec<&str> = tags.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(keys, vec!["bravo", "alpha"]);
    }
}
