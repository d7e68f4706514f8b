use auth::PasswordError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("name must not be empty")]
    Empty,

    #[error("name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all user-related operations.
///
/// Display texts of the credential variants are stable wire messages:
/// `InvalidCredentials` reads identically whether the email is unknown or
/// the password mismatched, so the login endpoint never reveals which
/// emails are registered.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("invalid user id: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("invalid password: {0}")]
    InvalidPassword(PasswordError),

    // Domain-level errors
    #[error("user already exists")]
    AlreadyExists(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user not found")]
    NotFound(String),

    // Infrastructure errors
    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("authentication backend error: {0}")]
    AuthBackend(String),
}

impl From<PasswordError> for UserError {
    fn from(err: PasswordError) -> Self {
        if err.is_validation() {
            UserError::InvalidPassword(err)
        } else {
            UserError::AuthBackend(err.to_string())
        }
    }
}
