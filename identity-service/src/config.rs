use std::env;

use auth::PasswordHasher;
use auth::TokenCodec;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use jsonwebtoken::Algorithm;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Token and hashing settings.
///
/// `secret_key` has no default and must come from configuration; everything
/// else falls back to production-safe values.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub secret_key: String,

    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: i64,

    #[serde(default = "default_refresh_token_expire_days")]
    pub refresh_token_expire_days: i64,

    #[serde(default = "default_issuer")]
    pub issuer: String,

    #[serde(default = "default_audience")]
    pub audience: String,

    #[serde(default = "default_leeway_seconds")]
    pub leeway_seconds: u64,

    #[serde(default = "default_hash_memory_kib")]
    pub hash_memory_kib: u32,

    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,

    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,

    #[serde(default = "default_hash_memory_kib")]
    pub min_hash_memory_kib: u32,

    #[serde(default = "default_hash_iterations")]
    pub min_hash_iterations: u32,
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_token_expire_minutes() -> i64 {
    30
}

fn default_refresh_token_expire_days() -> i64 {
    7
}

fn default_issuer() -> String {
    "identity-service".to_string()
}

fn default_audience() -> String {
    "identity-clients".to_string()
}

fn default_leeway_seconds() -> u64 {
    10
}

fn default_hash_memory_kib() -> u32 {
    19456
}

fn default_hash_iterations() -> u32 {
    2
}

fn default_hash_parallelism() -> u32 {
    1
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, AUTH__SECRET_KEY, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Fails fast when a source cannot be read or the auth settings are
    /// unusable; the service must not start with a weak secret or an
    /// unsupported algorithm.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: AUTH__SECRET_KEY=... overrides auth.secret_key
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.auth.validate()?;

        Ok(config)
    }
}

impl AuthConfig {
    const MIN_SECRET_LENGTH: usize = 32;
    const MIN_ACCESS_MINUTES: i64 = 5;
    const MAX_ACCESS_MINUTES: i64 = 1440;
    const MIN_REFRESH_DAYS: i64 = 1;
    const MAX_REFRESH_DAYS: i64 = 30;

    /// Check the settings a misconfigured deployment most often gets wrong.
    ///
    /// # Errors
    /// * `Message` - Secret too short, unsupported algorithm, or a lifetime
    ///   outside its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_key.len() < Self::MIN_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "auth.secret_key must be at least {} characters",
                Self::MIN_SECRET_LENGTH
            )));
        }
        self.algorithm()?;
        if !(Self::MIN_ACCESS_MINUTES..=Self::MAX_ACCESS_MINUTES)
            .contains(&self.access_token_expire_minutes)
        {
            return Err(ConfigError::Message(format!(
                "auth.access_token_expire_minutes must be between {} and {}",
                Self::MIN_ACCESS_MINUTES,
                Self::MAX_ACCESS_MINUTES
            )));
        }
        if !(Self::MIN_REFRESH_DAYS..=Self::MAX_REFRESH_DAYS)
            .contains(&self.refresh_token_expire_days)
        {
            return Err(ConfigError::Message(format!(
                "auth.refresh_token_expire_days must be between {} and {}",
                Self::MIN_REFRESH_DAYS,
                Self::MAX_REFRESH_DAYS
            )));
        }
        Ok(())
    }

    /// Parse the configured algorithm against the shared-secret allow-list.
    ///
    /// # Errors
    /// * `Message` - Algorithm is not HS256, HS384, or HS512
    pub fn algorithm(&self) -> Result<Algorithm, ConfigError> {
        match self.algorithm.as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            other => Err(ConfigError::Message(format!(
                "auth.algorithm must be one of HS256, HS384, HS512 (got {other})"
            ))),
        }
    }

    /// Build a token codec from these settings.
    ///
    /// # Errors
    /// * `Message` - Algorithm is not on the allow-list
    pub fn token_codec(&self) -> Result<TokenCodec, ConfigError> {
        Ok(TokenCodec::new(self.secret_key.as_bytes())
            .with_algorithm(self.algorithm()?)
            .with_issuer(&self.issuer)
            .with_audience(&self.audience)
            .with_leeway(self.leeway_seconds)
            .with_access_ttl(chrono::Duration::minutes(self.access_token_expire_minutes))
            .with_refresh_ttl(chrono::Duration::days(self.refresh_token_expire_days)))
    }

    /// Build a password hasher from these settings.
    ///
    /// The minimums drive lazy rehashing: stored hashes below them are
    /// migrated on the next successful login.
    ///
    /// # Errors
    /// * `Message` - The cost parameters are rejected by the hasher
    pub fn password_hasher(&self) -> Result<PasswordHasher, ConfigError> {
        PasswordHasher::with_costs(
            self.hash_memory_kib,
            self.hash_iterations,
            self.hash_parallelism,
        )
        .map(|h| h.with_minimums(self.min_hash_memory_kib, self.min_hash_iterations))
        .map_err(|e| ConfigError::Message(e.to_string()))
    }
}
