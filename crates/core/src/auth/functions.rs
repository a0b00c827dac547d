use super::AuthError;

/// Extracts the token from an `Authorization` header value.
///
/// Accepts `Bearer <token>` (scheme matched case-insensitively).
///
/// # Examples
///
/// ```
/// use skills_tracker_core::auth::extract_bearer_token;
///
/// assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Ok("abc.def.ghi"));
/// assert!(extract_bearer_token("abc.def.ghi").is_err());
/// ```
pub fn extract_bearer_token(header_value: &str) -> Result<&str, AuthError> {
    let mut parts = header_value.split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}
