//! Application state with repository-based storage.
//!
//! The shared state handed to every request handler. Storage is reached
//! through repository trait objects so handlers do not care which backend
//! is active.

use std::sync::Arc;

use skills_tracker_core::storage::{EntryRepository, TagRepository};

use crate::config::Config;
use crate::storage::InMemoryRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Entries table access.
    pub entry_repo: Arc<dyn EntryRepository>,
    /// Tags table access.
    pub tag_repo: Arc<dyn TagRepository>,
    /// Runtime configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState with the given repositories and configuration.
    pub fn new(
        entry_repo: Arc<dyn EntryRepository>,
        tag_repo: Arc<dyn TagRepository>,
        config: Config,
    ) -> Self {
        Self {
            entry_repo,
            tag_repo,
            config: Arc::new(config),
        }
    }

    /// Creates state backed by the in-memory repository.
    pub fn in_memory(config: Config) -> Self {
        let repo = Arc::new(InMemoryRepository::new());
        Self::new(repo.clone(), repo, config)
    }

    /// Creates state backed by DynamoDB, using the configured tables.
    #[cfg(feature = "dynamodb")]
    pub async fn dynamodb(config: Config) -> Self {
        let repo = Arc::new(crate::storage::DynamoDbRepository::from_config(&config).await);
        tracing::info!(
            entries_table = %config.entries_table,
            tags_table = %config.tags_table,
            region = %config.aws_region,
            "Using DynamoDB storage"
        );
        Self::new(repo.clone(), repo, config)
    }
}
