use thiserror::Error;

/// Errors that can occur when validating a new skill log entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Entry title too long (max 200 characters)")]
    TitleTooLong,
    #[error("No usable tags in: {0:?}")]
    NoUsableTags(String),
    #[error("End date must be after or equal to start date")]
    InvalidDateRange,
}
