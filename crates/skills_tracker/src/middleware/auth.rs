//! Shared-secret JWT authentication.
//!
//! Every data route requires `Authorization: Bearer <token>`, where the
//! token is HS256-signed with `BOLT_KEY` and carries an `exp` claim.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use skills_tracker_core::auth::{
    auth_error_to_status_code, extract_bearer_token, AuthError, BoltClaims,
};

use crate::{handlers::error::error_response, state::AppState};

/// Rejects requests without a valid token; stores the claims in the
/// request extensions otherwise.
pub async fn require_bolt_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), state.config.bolt_key.as_deref()) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            let status = StatusCode::from_u16(auth_error_to_status_code(&e))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            tracing::warn!(status = %status, error = %e, path = %request.uri().path(), "Authentication failed");
            error_response(status, status.canonical_reason().unwrap_or("Unauthorized"))
        }
    }
}

/// Checks the `Authorization` header against the shared secret.
///
/// A missing header is reported before a missing secret.
pub fn authenticate(headers: &HeaderMap, secret: Option<&str>) -> Result<BoltClaims, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let secret = secret.ok_or(AuthError::MissingSecret)?;
    let token = extract_bearer_token(header)?;

    verify_token(token, secret)
}

/// Verifies an HS256 token and its expiry.
pub fn verify_token(token: &str, secret: &str) -> Result<BoltClaims, AuthError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<BoltClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(format!("{:?}", e.kind())))
}
