use std::{env, time::Duration};

use skills_tracker_core::skills::DEFAULT_TAGS_PAGE_SIZE;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared HMAC key the chat-bot signs its tokens with.
    pub bolt_key: Option<String>,
    /// Entries table name (default: "hacky-skills-data")
    pub entries_table: String,
    /// Tags table name (default: "hacky-skills-tags")
    pub tags_table: String,
    /// Partition key attribute of the entries table (default: "skill-entry-key")
    #[allow(dead_code)]
    pub entries_key: String,
    /// Partition key attribute of the tags table (default: "skill-tag-key")
    #[allow(dead_code)]
    pub tags_key: String,
    /// Default `GET /tags` page size (default: 5)
    pub tags_page_size: usize,
    /// AWS region (default: "us-east-2")
    #[allow(dead_code)]
    pub aws_region: String,
    /// Custom DynamoDB endpoint, e.g. DynamoDB Local.
    #[allow(dead_code)]
    pub aws_endpoint_url: Option<String>,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BOLT_KEY` - Shared JWT signing key (no default; auth fails closed)
    /// - `ENTRIES_TABLE` - Entries table name (default: "hacky-skills-data")
    /// - `TAGS_TABLE` - Tags table name (default: "hacky-skills-tags")
    /// - `ENTRIES_KEY` - Entries partition key attribute (default: "skill-entry-key")
    /// - `TAGS_KEY` - Tags partition key attribute (default: "skill-tag-key")
    /// - `TAGS_PAGE_SIZE` - Default tags page size (default: 5)
    /// - `AWS_REGION` - AWS region (default: "us-east-2")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (optional)
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    pub fn from_env() -> Self {
        Self {
            bolt_key: env::var("BOLT_KEY").ok().filter(|k| !k.is_empty()),
            entries_table: env::var("ENTRIES_TABLE")
                .unwrap_or_else(|_| "hacky-skills-data".to_string()),
            tags_table: env::var("TAGS_TABLE").unwrap_or_else(|_| "hacky-skills-tags".to_string()),
            entries_key: env::var("ENTRIES_KEY")
                .unwrap_or_else(|_| "skill-entry-key".to_string()),
            tags_key: env::var("TAGS_KEY").unwrap_or_else(|_| "skill-tag-key".to_string()),
            tags_page_size: env::var("TAGS_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|size: &usize| *size > 0)
                .unwrap_or(DEFAULT_TAGS_PAGE_SIZE),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-2".to_string()),
            aws_endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Configuration for tests: in-memory tables and a known signing key.
    #[cfg(test)]
    pub fn for_tests(bolt_key: Option<&str>) -> Self {
        Self {
            bolt_key: bolt_key.map(str::to_string),
            entries_table: "entries".to_string(),
            tags_table: "tags".to_string(),
            entries_key: "id".to_string(),
            tags_key: "tag".to_string(),
            tags_page_size: DEFAULT_TAGS_PAGE_SIZE,
            aws_region: "us-east-2".to_string(),
            aws_endpoint_url: None,
            request_timeout_seconds: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
