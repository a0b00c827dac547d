//! Unauthenticated health endpoints.

use axum::http::StatusCode;

/// GET / - plain-text greeting, used by the chat-bot as a ping.
pub async fn root() -> &'static str {
    "Hello World!"
}

/// GET /livez - liveness check.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}
