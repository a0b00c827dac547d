pub mod auth;

pub use auth::require_bolt_token;
