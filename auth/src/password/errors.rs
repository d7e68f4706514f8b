use thiserror::Error;

/// Error type for password operations.
///
/// `Empty` and `TooLong` are input validation failures; the remaining
/// variants indicate an internal fault in the hashing backend.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("password must not be empty")]
    Empty,

    #[error("password too long: maximum {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("password hashing failed: {0}")]
    HashingFailed(String),

    #[error("password verification failed: {0}")]
    VerificationFailed(String),
}

impl PasswordError {
    /// Whether this failure is caused by the caller's input rather than a
    /// fault in the hashing backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, PasswordError::Empty | PasswordError::TooLong { .. })
    }
}
