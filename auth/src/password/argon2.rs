use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Adaptive password hashing with Argon2id.
///
/// Produces PHC string format hashes whose prefix identifies the scheme and
/// whose parameters carry the work factor used at hashing time. The stored
/// work factor is compared against configured minimums by `needs_rehash`,
/// which lets callers migrate weak hashes lazily on the next successful
/// verification.
///
/// The hasher holds only read-only configuration and is safe to share across
/// concurrent requests.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    min_memory_kib: u32,
    min_iterations: u32,
}

impl PasswordHasher {
    /// Create a hasher with the library's default work factor.
    ///
    /// The defaults are also used as the rehash minimums, so hashes produced
    /// by this instance never report `needs_rehash`.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
            min_memory_kib: Params::DEFAULT_M_COST,
            min_iterations: Params::DEFAULT_T_COST,
        }
    }

    /// Create a hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `memory_kib` - Argon2 memory cost in KiB
    /// * `iterations` - Argon2 time cost
    /// * `parallelism` - Argon2 lane count
    ///
    /// # Errors
    /// * `InvalidCost` - Parameters are outside the ranges Argon2 accepts
    pub fn with_costs(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidCost(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            min_memory_kib: memory_kib,
            min_iterations: iterations,
        })
    }

    /// Set the minimum work factor accepted for stored hashes.
    ///
    /// Hashes below either minimum report `needs_rehash`.
    pub fn with_minimums(mut self, min_memory_kib: u32, min_iterations: u32) -> Self {
        self.min_memory_kib = min_memory_kib;
        self.min_iterations = min_iterations;
        self
    }

    /// Hash a plaintext password.
    ///
    /// Uses a fresh random salt per call, so hashing the same password twice
    /// yields different strings.
    ///
    /// # Errors
    /// * `EmptyPassword` - Input is empty
    /// * `HashingFailed` - The hashing operation itself failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyPassword);
        }

        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Never fails: a malformed stored hash is logged and treated as a
    /// mismatch, so callers see the same `false` they would for a wrong
    /// password. Comparison of the derived key is constant-time.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored credential is not a valid PHC hash");
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Check whether a stored hash was produced with a work factor below the
    /// configured minimum.
    ///
    /// A malformed hash reports `false`; it can never verify, so there is
    /// nothing to migrate.
    pub fn needs_rehash(&self, stored: &str) -> bool {
        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot inspect work factor of malformed hash");
                return false;
            }
        };

        let params = match Params::try_from(&parsed) {
            Ok(params) => params,
            Err(e) => {
                tracing::warn!(error = %e, "Stored hash carries unreadable Argon2 parameters");
                return false;
            }
        };

        params.m_cost() < self.min_memory_kib || params.t_cost() < self.min_iterations
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
