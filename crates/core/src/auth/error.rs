use thiserror::Error;

/// Errors raised while authenticating a request from the chat-bot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,

    #[error("malformed authorization header")]
    MalformedHeader,

    #[error("no shared signing key configured")]
    MissingSecret,

    #[error("invalid token: {0}")]
    InvalidToken(String),
}

/// Maps an [`AuthError`] to an HTTP status code.
///
/// - `MissingHeader` -> 400
/// - `MissingSecret` -> 500
/// - `MalformedHeader` / `InvalidToken` -> 403
///
/// A header that is present but unusable is treated like a bad token.
pub fn auth_error_to_status_code(error: &AuthError) -> u16 {
    match error {
        AuthError::MissingHeader => 400,
        AuthError::MissingSecret => 500,
        AuthError::MalformedHeader | AuthError::InvalidToken(_) => 403,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(auth_error_to_status_code(&AuthError::MissingHeader), 400);
        assert_eq!(auth_error_to_status_code(&AuthError::MalformedHeader), 403);
        assert_eq!(auth_error_to_status_code(&AuthError::MissingSecret), 500);
        assert_eq!(
            auth_error_to_status_code(&AuthError::InvalidToken("ExpiredSignature".into())),
            403
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            AuthError::InvalidToken("InvalidSignature".to_string()).to_string(),
            "invalid token: InvalidSignature"
        );
    }
}
