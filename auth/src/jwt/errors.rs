use thiserror::Error;

use super::claims::TokenType;

/// Error type for token operations.
///
/// Expiry is kept distinct from other decode failures so callers can offer
/// differentiated messaging, even though both map to the same unauthenticated
/// treatment at the boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Wrong token type: expected {expected}, got {actual}")]
    WrongTokenType {
        expected: TokenType,
        actual: TokenType,
    },
}
