use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;

use super::claims::Claims;
use super::claims::TokenType;
use super::errors::TokenError;

/// Access + refresh token pair handed out on successful authentication.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Authorization scheme for the access token, always "Bearer"
    #[serde(rename = "token_type")]
    pub scheme: String,
}

/// Single source of truth for signing, encoding, decoding, and claim
/// validation of session tokens.
///
/// Algorithm, key, issuer, audience, TTLs, and clock-skew leeway are fixed at
/// construction; the codec is otherwise stateless and safe to share across
/// concurrent requests.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: Option<String>,
    audience: Option<String>,
    leeway_seconds: u64,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// Create a codec with a shared secret.
    ///
    /// Defaults: HS256, 30-minute access TTL, 7-day refresh TTL, 10 second
    /// clock-skew leeway, no issuer/audience verification.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: None,
            audience: None,
            leeway_seconds: 10,
            access_ttl: Duration::minutes(30),
            refresh_ttl: Duration::days(7),
        }
    }

    /// Set the signing algorithm (HMAC family).
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the issuer embedded at issuance and verified on decode.
    pub fn with_issuer(mut self, issuer: impl ToString) -> Self {
        self.issuer = Some(issuer.to_string());
        self
    }

    /// Set the audience embedded at issuance and verified on decode.
    pub fn with_audience(mut self, audience: impl ToString) -> Self {
        self.audience = Some(audience.to_string());
        self
    }

    /// Set the clock-skew leeway applied to expiry checks.
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway_seconds = seconds;
        self
    }

    /// Set the access token time-to-live.
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    /// Set the refresh token time-to-live.
    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    /// Issue a signed token for a subject.
    ///
    /// Builds claims with `iat = now` and `exp = now + ttl`, a fresh `jti`,
    /// and the configured issuer/audience.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing or serialization failed
    pub fn issue(
        &self,
        subject: &str,
        email: &str,
        username: &str,
        token_type: TokenType,
        ttl: Duration,
        extra: HashMap<String, serde_json::Value>,
    ) -> Result<String, TokenError> {
        let mut claims = Claims::new(subject, email, username, token_type, Utc::now(), ttl);
        claims.iss = self.issuer.clone();
        claims.aud = self.audience.clone();
        claims.extra = extra;

        let header = Header::new(self.algorithm);

        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        tracing::debug!(subject = %claims.sub, token_type = %token_type, "Token issued");
        Ok(token)
    }

    /// Issue an access + refresh pair with the configured TTLs.
    ///
    /// The two tokens always differ: distinct `token_type` and distinct
    /// `jti`.
    pub fn issue_pair(
        &self,
        subject: &str,
        email: &str,
        username: &str,
        extra: HashMap<String, serde_json::Value>,
    ) -> Result<TokenPair, TokenError> {
        let access_token = self.issue(
            subject,
            email,
            username,
            TokenType::Access,
            self.access_ttl,
            extra.clone(),
        )?;
        let refresh_token = self.issue(
            subject,
            email,
            username,
            TokenType::Refresh,
            self.refresh_ttl,
            extra,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            scheme: "Bearer".to_string(),
        })
    }

    /// Decode and validate a token, enforcing the expected usage class.
    ///
    /// Verifies the signature, expiry (with the configured leeway), and
    /// issuer/audience when configured. No partial claims are returned on
    /// failure.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past beyond the leeway
    /// * `InvalidToken` - Bad signature, wrong issuer/audience, or malformed structure
    /// * `WrongTokenType` - Valid token of the other usage class
    pub fn decode(&self, token: &str, expected_type: TokenType) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = self.leeway_seconds;
        validation.set_required_spec_claims(&["exp"]);

        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &self.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    _ => TokenError::InvalidToken(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.token_type != expected_type {
            tracing::warn!(
                subject = %claims.sub,
                expected = %expected_type,
                actual = %claims.token_type,
                "Token presented with wrong usage class"
            );
            return Err(TokenError::WrongTokenType {
                expected: expected_type,
                actual: claims.token_type,
            });
        }

        Ok(claims)
    }

    /// Mint a new access token from a valid refresh token.
    ///
    /// The new token carries the same subject, email, username, and extra
    /// claims. The consumed refresh token is not invalidated; it stays valid
    /// until its natural expiry.
    ///
    /// # Errors
    /// * `TokenExpired` - The refresh token is expired
    /// * `InvalidToken` - The refresh token is malformed or mis-signed
    /// * `WrongTokenType` - An access token was presented instead
    pub fn refresh(&self, refresh_token: &str) -> Result<String, TokenError> {
        let claims = self.decode(refresh_token, TokenType::Refresh)?;

        let access_token = self.issue(
            &claims.sub,
            &claims.email,
            &claims.username,
            TokenType::Access,
            self.access_ttl,
            claims.extra,
        )?;

        tracing::debug!(subject = %claims.sub, "Access token renewed from refresh token");
        Ok(access_token)
    }

    /// Configured access token time-to-live.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Configured refresh token time-to-live.
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET)
            .with_issuer("identity-service")
            .with_audience("identity-clients")
    }

    #[test]
    fn test_issue_and_decode_round_trip() {
        let codec = codec();

        let token = codec
            .issue(
                "u-1",
                "a@b.com",
                "alice",
                TokenType::Access,
                Duration::minutes(30),
                HashMap::new(),
            )
            .expect("Failed to issue token");

        // Three dot-separated base64url segments
        assert_eq!(token.split('.').count(), 3);

        let claims = codec
            .decode(&token, TokenType::Access)
            .expect("Failed to decode token");

        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert_eq!(claims.iss, Some("identity-service".to_string()));
        assert_eq!(claims.aud, Some("identity-clients".to_string()));
    }

    #[test]
    fn test_extra_claims_survive_round_trip() {
        let codec = codec();

        let mut extra = HashMap::new();
        extra.insert("role".to_string(), serde_json::json!("admin"));

        let token = codec
            .issue(
                "u-1",
                "a@b.com",
                "alice",
                TokenType::Access,
                Duration::minutes(5),
                extra,
            )
            .expect("Failed to issue token");

        let claims = codec
            .decode(&token, TokenType::Access)
            .expect("Failed to decode token");
        assert_eq!(claims.extra.get("role").unwrap().as_str(), Some("admin"));
    }

    #[test]
    fn test_expired_token_rejected() {
        let codec = codec().with_leeway(0);

        let token = codec
            .issue(
                "u-1",
                "a@b.com",
                "alice",
                TokenType::Access,
                Duration::seconds(-1),
                HashMap::new(),
            )
            .expect("Failed to issue token");

        let result = codec.decode(&token, TokenType::Access);
        assert_eq!(result, Err(TokenError::TokenExpired));
    }

    #[test]
    fn test_leeway_absorbs_clock_skew() {
        let codec = codec().with_leeway(30);

        let token = codec
            .issue(
                "u-1",
                "a@b.com",
                "alice",
                TokenType::Access,
                Duration::seconds(-5),
                HashMap::new(),
            )
            .expect("Failed to issue token");

        // Expired 5s ago, but inside the 30s leeway window
        assert!(codec.decode(&token, TokenType::Access).is_ok());
    }

    #[test]
    fn test_token_type_enforced_both_directions() {
        let codec = codec();

        let pair = codec
            .issue_pair("u-1", "a@b.com", "alice", HashMap::new())
            .expect("Failed to issue pair");

        let refresh_as_access = codec.decode(&pair.refresh_token, TokenType::Access);
        assert_eq!(
            refresh_as_access,
            Err(TokenError::WrongTokenType {
                expected: TokenType::Access,
                actual: TokenType::Refresh,
            })
        );

        let access_as_refresh = codec.decode(&pair.access_token, TokenType::Refresh);
        assert_eq!(
            access_as_refresh,
            Err(TokenError::WrongTokenType {
                expected: TokenType::Refresh,
                actual: TokenType::Access,
            })
        );
    }

    #[test]
    fn test_pair_tokens_differ() {
        let codec = codec();

        let pair = codec
            .issue_pair("u-1", "a@b.com", "alice", HashMap::new())
            .expect("Failed to issue pair");

        assert_ne!(pair.access_token, pair.refresh_token);
        assert_eq!(pair.scheme, "Bearer");

        let access = codec
            .decode(&pair.access_token, TokenType::Access)
            .expect("Failed to decode access token");
        let refresh = codec
            .decode(&pair.refresh_token, TokenType::Refresh)
            .expect("Failed to decode refresh token");
        assert_ne!(access.jti, refresh.jti);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let codec = codec();
        let other = TokenCodec::new(b"another_secret_key_of_32_bytes_ok!")
            .with_issuer("identity-service")
            .with_audience("identity-clients");

        let token = codec
            .issue(
                "u-1",
                "a@b.com",
                "alice",
                TokenType::Access,
                Duration::minutes(5),
                HashMap::new(),
            )
            .expect("Failed to issue token");

        assert!(matches!(
            other.decode(&token, TokenType::Access),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_issuer_mismatch_rejected() {
        let issuer_a = TokenCodec::new(SECRET).with_issuer("service-a");
        let issuer_b = TokenCodec::new(SECRET).with_issuer("service-b");

        let token = issuer_a
            .issue(
                "u-1",
                "a@b.com",
                "alice",
                TokenType::Access,
                Duration::minutes(5),
                HashMap::new(),
            )
            .expect("Failed to issue token");

        assert!(matches!(
            issuer_b.decode(&token, TokenType::Access),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_audience_mismatch_rejected() {
        let aud_a = TokenCodec::new(SECRET).with_audience("clients-a");
        let aud_b = TokenCodec::new(SECRET).with_audience("clients-b");

        let token = aud_a
            .issue(
                "u-1",
                "a@b.com",
                "alice",
                TokenType::Access,
                Duration::minutes(5),
                HashMap::new(),
            )
            .expect("Failed to issue token");

        assert!(matches!(
            aud_b.decode(&token, TokenType::Access),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let codec = codec();
        assert!(matches!(
            codec.decode("not.a.token", TokenType::Access),
            Err(TokenError::InvalidToken(_))
        ));
        assert!(matches!(
            codec.decode("", TokenType::Access),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_refresh_issues_matching_access_token() {
        let codec = codec();

        let pair = codec
            .issue_pair("u-1", "a@b.com", "alice", HashMap::new())
            .expect("Failed to issue pair");

        let new_access = codec
            .refresh(&pair.refresh_token)
            .expect("Failed to refresh access token");

        let claims = codec
            .decode(&new_access, TokenType::Access)
            .expect("Failed to decode renewed token");
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_refresh_rejects_access_token() {
        let codec = codec();

        let pair = codec
            .issue_pair("u-1", "a@b.com", "alice", HashMap::new())
            .expect("Failed to issue pair");

        assert!(matches!(
            codec.refresh(&pair.access_token),
            Err(TokenError::WrongTokenType { .. })
        ));
    }
}
