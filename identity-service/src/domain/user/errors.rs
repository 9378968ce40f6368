use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password strength policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,

    #[error("Password must contain at least one special character")]
    MissingSpecial,

    #[error("Password must not contain whitespace")]
    ContainsWhitespace,

    #[error("Password must contain only ASCII characters")]
    NonAscii,
}

/// Error for stored credential format failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Credential hash must not be empty")]
    Empty,

    #[error("Credential hash does not carry a supported scheme tag")]
    UnsupportedScheme,
}

/// Error for user directory (persistence) operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Flow-boundary error for all authentication use cases.
///
/// Lookup miss, inactive user, and wrong password are all collapsed into
/// `InvalidCredentials` before leaving a flow; the specific cause is logged
/// internally. `TokenExpired` and `TokenInvalid` stay distinct so clients
/// can be told to log in again, though transports treat both as
/// unauthenticated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    MalformedInput(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    TokenInvalid(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::TokenExpired => AuthError::TokenExpired,
            TokenError::InvalidToken(message) => AuthError::TokenInvalid(message),
            TokenError::WrongTokenType { .. } => AuthError::TokenInvalid(err.to_string()),
            TokenError::EncodingFailed(message) => AuthError::Internal(message),
        }
    }
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        AuthError::Persistence(err.to_string())
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::EmptyPassword => AuthError::MalformedInput(err.to_string()),
            PasswordError::InvalidCost(_) | PasswordError::HashingFailed(_) => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}
