//! Authentication infrastructure for the auth-service.
//!
//! Provides the cryptographic building blocks the web layer composes:
//! - Password hashing (Argon2id)
//! - Session token (JWT) issuance and validation
//! - Opaque single-use tokens for email verification and password reset
//!
//! The service defines its own domain ports and adapts these implementations,
//! keeping storage and HTTP concerns out of this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Session tokens
//! ```
//! use auth::{Authenticator, SessionClaims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash the password for storage
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a session token
//! let claims = SessionClaims::new("user123", "Alice", "admin", 24);
//! let session = auth.authenticate("password123", &hash, claims).unwrap();
//!
//! // Guard: validate the token on protected routes
//! let decoded = auth.validate_token(&session.access_token).unwrap();
//! assert_eq!(decoded.role, "admin");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::Session;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::OneTimeToken;
