//! DynamoDB repository implementation.
//!
//! Implements the repository traits from `skills_tracker_core::storage` over
//! two tables. Their partition key attribute names come from [`KeySchema`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, KeysAndAttributes, ReturnValue, Select};
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};

use skills_tracker_core::skills::{
    Entry, EntrySummary, NormalizedTag, Tag, TagSummary, TagUpsertOutcome,
};
use skills_tracker_core::storage::{
    EntryRepository, Page, PageRequest, RepositoryError, Result, TagRepository,
};

use super::conversions::{
    decode_all, entry_to_item, format_timestamp, item_to_entry, item_to_entry_summary,
    item_to_tag, item_to_tag_summary,
};
use super::error::{
    map_batch_get_item_error, map_build_error, map_put_item_error, map_scan_error,
    map_update_item_error,
};
use super::keys::KeySchema;
use crate::config::Config;

type Item = HashMap<String, AttributeValue>;

/// BatchGetItem accepts at most this many keys per request.
const BATCH_GET_LIMIT: usize = 100;

/// Rounds spent re-requesting unprocessed keys before giving up.
const MAX_UNPROCESSED_RETRIES: u32 = 5;

/// Atomic find-or-create of a tag record that links one entry id.
const UPSERT_TAG_EXPRESSION: &str = "SET originalTag = if_not_exists(originalTag, :original), \
     createdAt = if_not_exists(createdAt, :now) ADD entries :entry";

/// Fields read for search results. `#k` aliases the entries key.
const ENTRY_SUMMARY_PROJECTION: &str = "#k, title, createdAt, userId";

/// Fields read for tag listings. `#k` aliases the tags key.
const TAG_SUMMARY_PROJECTION: &str = "#k, originalTag, createdAt";

/// A projection applied to batch reads, with the table key it aliases.
struct Projection<'a> {
    expression: &'static str,
    key_name: &'a str,
}

/// DynamoDB-based repository implementation.
pub struct DynamoDbRepository {
    client: Client,
    entries_table: String,
    tags_table: String,
    keys: KeySchema,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given client, table names and key names.
    pub fn new(
        client: Client,
        entries_table: impl Into<String>,
        tags_table: impl Into<String>,
        keys: KeySchema,
    ) -> Self {
        Self {
            client,
            entries_table: entries_table.into(),
            tags_table: tags_table.into(),
            keys,
        }
    }

    /// Creates a repository from application configuration.
    ///
    /// Uses the AWS SDK default credential chain, the configured region, and
    /// `AWS_ENDPOINT_URL` when pointing at DynamoDB Local.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()));

        if let Some(endpoint) = &config.aws_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self::new(
            Client::new(&sdk_config),
            &config.entries_table,
            &config.tags_table,
            KeySchema::new(&config.entries_key, &config.tags_key),
        )
    }

    /// Reads items by key in chunks, re-requesting unprocessed keys.
    async fn batch_get(
        &self,
        table: &str,
        keys: Vec<Item>,
        projection: Option<&Projection<'_>>,
    ) -> Result<Vec<Item>> {
        let mut found = Vec::with_capacity(keys.len());

        for chunk in keys.chunks(BATCH_GET_LIMIT) {
            let mut builder = KeysAndAttributes::builder().set_keys(Some(chunk.to_vec()));
            if let Some(projection) = projection {
                builder = builder
                    .projection_expression(projection.expression)
                    .expression_attribute_names("#k", projection.key_name);
            }
            let mut pending = Some(builder.build().map_err(map_build_error)?);
            let mut attempt = 0;

            while let Some(request) = pending.take() {
                if attempt > MAX_UNPROCESSED_RETRIES {
                    return Err(RepositoryError::QueryFailed(format!(
                        "BatchGetItem on {table} left keys unprocessed after {MAX_UNPROCESSED_RETRIES} retries"
                    )));
                }
                if attempt > 0 {
                    tokio::time::sleep(Duration::from_millis(50 * 2u64.pow(attempt))).await;
                }

                let output = self
                    .client
                    .batch_get_item()
                    .request_items(table, request)
                    .send()
                    .await
                    .map_err(map_batch_get_item_error)?;

                if let Some(items) = output.responses.and_then(|mut r| r.remove(table)) {
                    found.extend(items);
                }

                pending = output
                    .unprocessed_keys
                    .and_then(|mut u| u.remove(table))
                    .filter(|k| !k.keys().is_empty());
                attempt += 1;

                if pending.is_some() {
                    tracing::debug!(table, attempt, "Retrying unprocessed keys");
                }
            }
        }

        Ok(found)
    }
}

// ============================================================================
// EntryRepository implementation
// ============================================================================

#[async_trait]
impl EntryRepository for DynamoDbRepository {
    async fn create_entry(&self, entry: &Entry) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.entries_table)
            .set_item(Some(entry_to_item(entry, &self.keys)))
            .condition_expression("attribute_not_exists(#k)")
            .expression_attribute_names("#k", &self.keys.entries)
            .send()
            .await
            .map_err(|e| map_put_item_error(e, "Entry", entry.id.clone()))?;

        Ok(())
    }

    async fn list_entries(&self, user_id: Option<&str>) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let mut request = self
                .client
                .scan()
                .table_name(&self.entries_table)
                .set_exclusive_start_key(start_key.take());

            if let Some(user_id) = user_id {
                request = request
                    .filter_expression("#user = :userId")
                    .expression_attribute_names("#user", "userId")
                    .expression_attribute_values(":userId", AttributeValue::S(user_id.to_string()));
            }

            let output = request.send().await.map_err(map_scan_error)?;

            let items = output.items.unwrap_or_default();
            entries.extend(decode_all(&items, |item| item_to_entry(item, &self.keys)));

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(entries)
    }

    async fn get_entry_summaries(&self, ids: &[String]) -> Result<Vec<EntrySummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys = ids.iter().map(|id| self.keys.entry_key(id)).collect();
        let projection = Projection {
            expression: ENTRY_SUMMARY_PROJECTION,
            key_name: &self.keys.entries,
        };
        let items = self
            .batch_get(&self.entries_table, keys, Some(&projection))
            .await?;

        let mut by_id: HashMap<String, EntrySummary> =
            decode_all(&items, |item| item_to_entry_summary(item, &self.keys))
                .into_iter()
                .map(|s| (s.id.clone(), s))
                .collect();

        // BatchGetItem returns items in no particular order.
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}

// ============================================================================
// TagRepository implementation
// ============================================================================

#[async_trait]
impl TagRepository for DynamoDbRepository {
    async fn upsert_tag(
        &self,
        tag: &NormalizedTag,
        entry_id: &str,
        now: DateTime<Utc>,
    ) -> Result<TagUpsertOutcome> {
        let output = self
            .client
            .update_item()
            .table_name(&self.tags_table)
            .set_key(Some(self.keys.tag_key(&tag.key)))
            .update_expression(UPSERT_TAG_EXPRESSION)
            .expression_attribute_values(":original", AttributeValue::S(tag.original.clone()))
            .expression_attribute_values(":now", AttributeValue::S(format_timestamp(now)))
            .expression_attribute_values(":entry", AttributeValue::Ss(vec![entry_id.to_string()]))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, tag.key.clone()))?;

        // ALL_OLD only returns attributes when the item existed before.
        let existed = output.attributes.is_some_and(|attrs| !attrs.is_empty());
        Ok(if existed {
            TagUpsertOutcome::Updated
        } else {
            TagUpsertOutcome::Created
        })
    }

    async fn list_tags(&self, page: &PageRequest) -> Result<Page<TagSummary>> {
        let limit = i32::try_from(page.limit).unwrap_or(i32::MAX);

        let output = self
            .client
            .scan()
            .table_name(&self.tags_table)
            .limit(limit)
            .projection_expression(TAG_SUMMARY_PROJECTION)
            .expression_attribute_names("#k", &self.keys.tags)
            .set_exclusive_start_key(page.after.as_deref().map(|after| self.keys.tag_key(after)))
            .send()
            .await
            .map_err(map_scan_error)?;

        let items = decode_all(
            output.items.as_deref().unwrap_or_default(),
            |item| item_to_tag_summary(item, &self.keys),
        );

        let next_cursor = output
            .last_evaluated_key
            .as_ref()
            .and_then(|key| self.keys.tag_cursor(key));

        Ok(Page { items, next_cursor })
    }

    async fn count_tags(&self) -> Result<usize> {
        let mut total = 0usize;
        let mut start_key: Option<Item> = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.tags_table)
                .select(Select::Count)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(map_scan_error)?;

            total += usize::try_from(output.count).unwrap_or_default();

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(total)
    }

    async fn get_tags(&self, tag_keys: &[String]) -> Result<Vec<Tag>> {
        if tag_keys.is_empty() {
            return Ok(Vec::new());
        }

        let keys = tag_keys.iter().map(|k| self.keys.tag_key(k)).collect();
        let items = self.batch_get(&self.tags_table, keys, None).await?;

        let mut by_key: HashMap<String, Tag> =
            decode_all(&items, |item| item_to_tag(item, &self.keys))
                .into_iter()
                .map(|t| (t.tag.clone(), t))
                .collect();

        Ok(tag_keys.iter().filter_map(|k| by_key.remove(k)).collect())
    }
}
