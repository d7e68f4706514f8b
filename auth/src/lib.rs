//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for HTTP services:
//! - Password hashing (Argon2id)
//! - Signed access token generation and validation
//! - Role classification for authorization
//! - Authentication coordination
//!
//! The service crate owns user persistence and the HTTP surface; this crate
//! owns everything cryptographic so that the signing secret and hashing
//! parameters are configured in exactly one place.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{AccessClaims, Role, TokenHandler};
//!
//! let handler = TokenHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = AccessClaims::new("user123", "alice@example.com", Role::User, 24);
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Role};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 24);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth
//!     .authenticate("password123", &hash, "user123", "alice@example.com", Role::User)
//!     .unwrap();
//!
//! // Validate token
//! let claims = auth.verify_token(&result.access_token).unwrap();
//! assert_eq!(claims.email, "alice@example.com");
//! ```

pub mod authenticator;
pub mod password;
pub mod role;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use role::Role;
pub use role::RoleError;
pub use token::AccessClaims;
pub use token::TokenError;
pub use token::TokenHandler;
