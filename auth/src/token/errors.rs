use thiserror::Error;

/// Error type for access token operations.
///
/// The `Display` texts of the verification variants are stable: they are the
/// messages callers surface to clients, so they must not change shape.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token")]
    InvalidToken(String),

    #[error("invalid token payload")]
    MissingClaim(&'static str),
}
