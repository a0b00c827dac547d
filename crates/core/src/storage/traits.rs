use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::skills::{Entry, EntrySummary, NormalizedTag, Tag, TagSummary, TagUpsertOutcome};

use super::{Page, PageRequest, Result};

/// Repository for skill log entries.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Stores a new entry. Fails with `AlreadyExists` if the id is taken.
    async fn create_entry(&self, entry: &Entry) -> Result<()>;

    /// Returns every entry, optionally only those written by `user_id`.
    async fn list_entries(&self, user_id: Option<&str>) -> Result<Vec<Entry>>;

    /// Looks up entry summaries by id. Unknown ids are skipped.
    async fn get_entry_summaries(&self, ids: &[String]) -> Result<Vec<EntrySummary>>;
}

/// Repository for tag records.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Links `entry_id` to the tag, creating the tag record if needed.
    ///
    /// Implementations must apply the whole upsert atomically per tag so
    /// concurrent entries sharing a tag never lose each other's ids.
    async fn upsert_tag(
        &self,
        tag: &NormalizedTag,
        entry_id: &str,
        now: DateTime<Utc>,
    ) -> Result<TagUpsertOutcome>;

    /// Returns one page of tags.
    async fn list_tags(&self, page: &PageRequest) -> Result<Page<TagSummary>>;

    /// Counts every tag record.
    async fn count_tags(&self) -> Result<usize>;

    /// Looks up tags by key. Unknown keys are skipped.
    async fn get_tags(&self, keys: &[String]) -> Result<Vec<Tag>>;
}
