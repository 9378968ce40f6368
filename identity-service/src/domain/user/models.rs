use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::user::errors::CredentialError;
use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::UserIdError;
use crate::domain::user::errors::UsernameError;
use crate::domain::user::events::UserEvent;

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-30 characters and contains only alphanumeric,
/// underscore, and hyphen. The same rules are enforced at registration, so
/// anything failing here cannot name a real account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 30;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 30 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        // Bounds are in characters, not bytes
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password value type, validated against the strength policy.
///
/// Rules: 8-128 characters, at least one uppercase letter, one lowercase
/// letter, one digit, and one special character; no whitespace; ASCII only.
/// The value is never serialized and `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 128;
    const SPECIAL_CHARS: &'static str = "!@#$%^&*()_+{}[]:;<>,.?~\\-";

    /// Create a validated password from plaintext.
    ///
    /// # Errors
    /// The first violated strength rule, in checking order.
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordPolicyError::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PasswordPolicyError::MissingLowercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }
        if !password.chars().any(|c| Self::SPECIAL_CHARS.contains(c)) {
            return Err(PasswordPolicyError::MissingSpecial);
        }
        if password.chars().any(|c| c.is_whitespace()) {
            return Err(PasswordPolicyError::ContainsWhitespace);
        }
        if !password.is_ascii() {
            return Err(PasswordPolicyError::NonAscii);
        }
        Ok(Self(password))
    }

    /// Get the plaintext for hashing or verification.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Stored credential: an opaque hash string with an embedded scheme tag.
///
/// Only Argon2 PHC strings are accepted; any other format is rejected when
/// the value is constructed, whether from fresh hashing or storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a stored hash, checking its scheme tag.
    ///
    /// # Errors
    /// * `Empty` - Hash string is empty
    /// * `UnsupportedScheme` - Prefix does not identify an Argon2 PHC hash
    pub fn new(hash: String) -> Result<Self, CredentialError> {
        if hash.is_empty() {
            return Err(CredentialError::Empty);
        }
        if !hash.starts_with("$argon2") {
            return Err(CredentialError::UnsupportedScheme);
        }
        Ok(Self(hash))
    }

    /// Get the hash as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// User aggregate entity.
///
/// Fields are private; external code reads through accessors and mutates
/// only through the explicit methods below. Deactivation is a soft flag;
/// users are never deleted.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    credential: Credential,
    first_name: String,
    last_name: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new active user with current timestamps.
    pub fn new(
        username: Username,
        email: EmailAddress,
        credential: Credential,
        first_name: String,
        last_name: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email,
            credential,
            first_name,
            last_name,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Rebuild a user from stored state. Used by persistence adapters only.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: UserId,
        username: Username,
        email: EmailAddress,
        credential: Credential,
        first_name: String,
        last_name: Option<String>,
        is_active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        last_login_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            credential,
            first_name,
            last_name,
            is_active,
            created_at,
            updated_at,
            last_login_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Replace the stored credential. The only mutation performed by the
    /// change-password flow.
    pub fn rotate_credential(&mut self, credential: Credential) {
        self.credential = credential;
        self.updated_at = Utc::now();
    }

    /// Record a successful login timestamp.
    pub fn record_login(&mut self, at: DateTime<Utc>) {
        self.last_login_at = Some(at);
    }

    /// Soft-deactivate the account.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

/// Public view of a user, safe to hand to transport layers.
///
/// Never carries the credential.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl PublicUser {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().as_str().to_string(),
            email: user.email().as_str().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().map(|s| s.to_string()),
            is_active: user.is_active(),
            created_at: user.created_at(),
            last_login_at: user.last_login_at(),
        }
    }
}

/// Result of a successful login: the issued token pair, a public view of the
/// authenticated user, and the domain events the flow emitted.
#[derive(Debug)]
pub struct LoginSuccess {
    pub tokens: auth::TokenPair,
    pub user: PublicUser,
    pub events: Vec<UserEvent>,
}
