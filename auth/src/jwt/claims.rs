use std::collections::HashMap;
use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Usage class of a token, fixed at issuance.
///
/// Access tokens authorize API calls; refresh tokens are only good for
/// minting new access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// Signed token claims.
///
/// Standard RFC 7519 claims plus the subject's email and username, the
/// token usage class, and custom fields flattened via `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier, string form of a UUID)
    pub sub: String,

    /// Subject's email address
    pub email: String,

    /// Subject's username
    pub username: String,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Usage class, enforced on decode
    pub token_type: TokenType,

    /// Unique token identifier, fresh per issuance
    pub jti: String,

    /// Issuer, verified on decode when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience, verified on decode when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// Additional custom fields (flattened into the payload)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Build claims for a subject with expiry relative to `issued_at`.
    ///
    /// Generates a fresh `jti`; issuer and audience start unset.
    pub fn new(
        subject: impl ToString,
        email: impl ToString,
        username: impl ToString,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            email: email.to_string(),
            username: username.to_string(),
            exp: (issued_at + ttl).timestamp(),
            iat: issued_at.timestamp(),
            token_type,
            jti: Uuid::new_v4().to_string(),
            iss: None,
            aud: None,
            extra: HashMap::new(),
        }
    }

}
