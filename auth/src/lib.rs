//! Authentication infrastructure library
//!
//! Provides the credential and token primitives used by the identity
//! service:
//! - Password hashing and verification (Argon2id) with lazy work-factor
//!   migration
//! - Signed session token issuance, decoding, and refresh with claim
//!   invariant enforcement
//!
//! The service crate defines its own authentication flows and ports on top
//! of these implementations; nothing here touches persistence.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use std::collections::HashMap;
//! use auth::{TokenCodec, TokenType};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!")
//!     .with_issuer("identity-service");
//!
//! let pair = codec
//!     .issue_pair("u-1", "a@b.com", "alice", HashMap::new())
//!     .unwrap();
//! let claims = codec.decode(&pair.access_token, TokenType::Access).unwrap();
//! assert_eq!(claims.sub, "u-1");
//!
//! // A refresh token mints new access tokens
//! let renewed = codec.refresh(&pair.refresh_token).unwrap();
//! assert!(codec.decode(&renewed, TokenType::Access).is_ok());
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TokenPair;
pub use jwt::TokenType;
pub use password::PasswordError;
pub use password::PasswordHasher;
