use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::role::Role;
use crate::token::AccessClaims;
use crate::token::TokenError;
use crate::token::TokenHandler;

/// Authentication coordinator combining password verification and token issue.
///
/// Owns the signing secret and token lifetime so they are configured once at
/// process start and passed in explicitly, never reached through globals.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_handler: TokenHandler,
    token_ttl_hours: i64,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    #[error("token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl_hours` - Lifetime of issued tokens in hours
    pub fn new(jwt_secret: &[u8], token_ttl_hours: i64) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_handler: TokenHandler::new(jwt_secret),
            token_ttl_hours,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Input invalid or hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token for the credential.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Unique user identifier carried as the token subject
    /// * `email` - Email address of the credential
    /// * `role` - Role attached to the credential
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Password verification failed
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        email: &str,
        role: Role,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(subject, email, role)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue an access token without password verification.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn issue_token(
        &self,
        subject: &str,
        email: &str,
        role: Role,
    ) -> Result<String, TokenError> {
        let claims = AccessClaims::new(subject, email, role, self.token_ttl_hours);
        self.token_handler.encode(&claims)
    }

    /// Validate a token and extract its claims.
    ///
    /// # Errors
    /// * `TokenError` - Token invalid, expired, or payload incomplete
    pub fn verify_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.token_handler.decode(token)
    }
}
