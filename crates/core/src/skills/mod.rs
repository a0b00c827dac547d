mod error;
mod reconcile;
mod requests;
mod search;
mod tags;
mod types;

pub use error::EntryError;
pub use reconcile::{upsert_tag, ReconcileReport, TagUpsertOutcome};
pub use requests::{
    resolve_page_size, CreateEntryRequest, ListItemsQuery, ListTagsQuery, PreparedEntry,
    SearchQuery, DEFAULT_TAGS_PAGE_SIZE, MAX_TAGS_PAGE_SIZE,
};
pub use search::unique_entry_ids;
pub use tags::{normalize_tag, split_tags, tag_keys, NormalizedTag};
pub use types::{Entry, EntrySummary, EntryType, Tag, TagSummary};
