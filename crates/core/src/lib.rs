//! Functional core of the skills tracker.
//!
//! Pure data types and functions for skill log entries, tags, and the
//! storage contracts the server implements. Nothing in this crate performs I/O.

pub mod auth;
pub mod serde;
pub mod skills;
pub mod storage;
