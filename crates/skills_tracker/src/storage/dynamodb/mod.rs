//! DynamoDB storage backend implementation.
//!
//! Two tables: entries and tags, the latter keyed by the lower-cased tag.
//! Table names and partition key attributes are configurable. The defaults
//! point at the chat-bot's existing `hacky-skills-data` and
//! `hacky-skills-tags` tables, whose records (short hex ids, `log_entry`
//! type, blank end dates) decode as-is.

mod conversions;
mod error;
mod keys;
mod repository;

pub use repository::DynamoDbRepository;
