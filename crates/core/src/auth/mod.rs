mod error;
mod functions;
mod types;

pub use error::{auth_error_to_status_code, AuthError};
pub use functions::extract_bearer_token;
pub use types::BoltClaims;
