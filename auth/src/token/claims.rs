use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::role::Role;

/// Claims carried by an access token.
///
/// The claim set is fixed: subject id, email, and role identify the
/// credential the token was issued for; `iat`/`exp` bound its lifetime to
/// absolute wall-clock time. A token remains verifiable until `exp` passes
/// regardless of later credential changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Email address of the subject
    pub email: String,

    /// Role attached to the credential at issue time
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for a credential with automatic expiration.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `email` - Email address of the credential
    /// * `role` - Role attached to the credential
    /// * `ttl_hours` - Hours until the token expires
    pub fn new(subject: impl ToString, email: impl ToString, role: Role, ttl_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(ttl_hours);

        Self {
            sub: subject.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the claims are expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_lifetime() {
        let claims = AccessClaims::new("user123", "alice@example.com", Role::User, 24);

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_is_expired() {
        let mut claims = AccessClaims::new("user123", "alice@example.com", Role::User, 1);
        claims.exp = 1000;

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_role_serializes_as_plain_string() {
        let claims = AccessClaims::new("user123", "alice@example.com", Role::Admin, 1);

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], "admin");
        assert_eq!(json["sub"], "user123");
    }
}
