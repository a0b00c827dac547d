//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `skills_tracker_core::storage`.
//!
//! - `inmemory`: always compiled; used by tests and `--storage memory`
//! - `dynamodb` (default feature): AWS DynamoDB via `aws-sdk-dynamodb`
//!
//! Build without DynamoDB:
//! ```bash
//! cargo build -p skills_tracker --no-default-features
//! ```

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRepository;
pub use inmemory::InMemoryRepository;
