use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::AccessClaims;
use super::errors::TokenError;
use crate::role::Role;

/// Signed access token handler.
///
/// Issues and verifies tokens carrying [`AccessClaims`], signed with
/// HS256 (HMAC with SHA-256) over a shared secret. Signature comparison is
/// constant-time inside the HMAC verification.
pub struct TokenHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

/// Claims as they arrive on the wire, before payload completeness checks.
///
/// `sub`/`email` default to empty and `role` to absent so that an
/// incomplete payload survives deserialization and is rejected explicitly
/// with `MissingClaim` instead of a generic decode failure.
#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(default)]
    sub: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    iat: i64,
    exp: i64,
}

impl TokenHandler {
    /// Create a new token handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &AccessClaims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a signed token.
    ///
    /// Verifies the signature, then the expiry (absolute wall-clock, zero
    /// leeway), then payload completeness: a token whose signature is valid
    /// but whose `sub`, `email`, or `role` claim is absent or empty never
    /// yields claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed token or signature mismatch
    /// * `TokenExpired` - Token expiry has passed
    /// * `MissingClaim` - Required claim absent or empty
    pub fn decode(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data = decode::<RawClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidToken(e.to_string()),
            })?;

        let raw = token_data.claims;
        if raw.sub.is_empty() {
            return Err(TokenError::MissingClaim("sub"));
        }
        if raw.email.is_empty() {
            return Err(TokenError::MissingClaim("email"));
        }
        let role = raw.role.ok_or(TokenError::MissingClaim("role"))?;

        Ok(AccessClaims {
            sub: raw.sub,
            email: raw.email,
            role,
            iat: raw.iat,
            exp: raw.exp,
        })
    }
}
