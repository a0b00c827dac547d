pub mod entries;
pub mod error;
pub mod health;
pub mod response;
pub mod search;
pub mod tags;

pub use error::AppError;
