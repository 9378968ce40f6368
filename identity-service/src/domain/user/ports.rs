use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::errors::AuthError;
use crate::domain::user::errors::DirectoryError;
use crate::domain::user::events::UserEvent;
use crate::domain::user::models::Credential;
use crate::domain::user::models::LoginSuccess;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Port for the authentication use cases.
///
/// This is the use-case boundary contract; transports call these four
/// operations and nothing else.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user, inactive user, or wrong
    ///   password, indistinguishably
    /// * `Persistence` - Lookup infrastructure failed
    async fn login(&self, username: &str, password: &str) -> Result<LoginSuccess, AuthError>;

    /// Rotate the authenticated user's password.
    ///
    /// # Errors
    /// * `TokenExpired` / `TokenInvalid` - Access token rejected
    /// * `MalformedInput` - New password fails the strength policy, or
    ///   equals the current password
    /// * `InvalidCredentials` - Wrong current password, or missing/inactive user
    /// * `Persistence` - The credential write could not be committed
    async fn change_password(
        &self,
        access_token: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<Vec<UserEvent>, AuthError>;

    /// Resolve an access token to a public user view.
    ///
    /// # Errors
    /// * `TokenExpired` / `TokenInvalid` - Access token rejected
    /// * `InvalidCredentials` - Subject missing or inactive
    async fn current_user(&self, access_token: &str) -> Result<PublicUser, AuthError>;

    /// Mint a new access token from a valid refresh token.
    ///
    /// # Errors
    /// * `TokenExpired` / `TokenInvalid` - Refresh token rejected
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthError>;
}

/// Persistence port for user lookup and credential rotation.
///
/// The core owns no storage; adapters implement this trait. The single
/// transactional mutation is `rotate_credential`: it must be committed
/// atomically or leave the prior credential intact.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `Database` - Lookup infrastructure failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError>;

    /// Retrieve a user by username.
    ///
    /// # Errors
    /// * `Database` - Lookup infrastructure failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<User>, DirectoryError>;

    /// Retrieve a user by email address.
    ///
    /// # Errors
    /// * `Database` - Lookup infrastructure failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError>;

    /// Replace the stored credential for a user, atomically.
    ///
    /// # Errors
    /// * `NotFound` - No row for this user; nothing was written
    /// * `Database` - The write or its commit failed; the prior credential
    ///   remains intact
    async fn rotate_credential(
        &self,
        id: &UserId,
        credential: &Credential,
    ) -> Result<(), DirectoryError>;

    /// Replace the stored credential only while it still equals `expected`.
    ///
    /// Returns whether the swap happened. Opportunistic rehashing goes
    /// through this so a password change committed in the meantime is never
    /// overwritten.
    ///
    /// # Errors
    /// * `Database` - The write failed
    async fn rotate_credential_if_current(
        &self,
        id: &UserId,
        expected: &Credential,
        replacement: &Credential,
    ) -> Result<bool, DirectoryError>;

    /// Record a successful login timestamp. Callers treat failures as
    /// best-effort.
    ///
    /// # Errors
    /// * `Database` - The write failed
    async fn record_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), DirectoryError>;
}
