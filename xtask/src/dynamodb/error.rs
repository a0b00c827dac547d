//! Error types for DynamoDB operations.

use thiserror::Error;

/// Result type alias for dynamodb module.
pub type Result<T> = std::result::Result<T, DynamodbError>;

/// Errors that can occur during DynamoDB operations.
#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Table '{table_name}' is keyed by '{actual}', expected '{expected}'; destroy it first")]
    KeyMismatch {
        table_name: String,
        expected: String,
        actual: String,
    },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Timeout waiting for table '{0}' to become active")]
    TableActivationTimeout(String),
}
