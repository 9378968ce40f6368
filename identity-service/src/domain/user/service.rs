use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth::TokenType;
use chrono::Utc;

use crate::domain::user::errors::AuthError;
use crate::domain::user::events::PasswordChangedEvent;
use crate::domain::user::events::UserEvent;
use crate::domain::user::events::UserLoggedInEvent;
use crate::domain::user::models::Credential;
use crate::domain::user::models::LoginSuccess;
use crate::domain::user::models::Password;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserDirectory;

/// Authentication flow implementation.
///
/// Collaborators are injected at construction: the user directory port, the
/// password hasher, and the token codec. Password hashing and verification
/// are CPU-bound and run on the blocking pool so in-flight requests are not
/// stalled; token operations run inline.
pub struct AuthService<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
    hasher: PasswordHasher,
    tokens: Arc<TokenCodec>,
}

impl<D> AuthService<D>
where
    D: UserDirectory,
{
    /// Create an authentication service with injected collaborators.
    pub fn new(directory: Arc<D>, hasher: PasswordHasher, tokens: Arc<TokenCodec>) -> Self {
        Self {
            directory,
            hasher,
            tokens,
        }
    }

    async fn verify_blocking(&self, password: String, stored: String) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    async fn hash_blocking(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .map_err(AuthError::from)
    }

    /// Re-hash a verified password at the current work factor and persist
    /// it, detached from the calling flow. Failure never reaches the caller.
    ///
    /// The write is conditional on the credential the login verified: a
    /// password change committed while this task runs wins, and the rehash
    /// is skipped.
    fn spawn_rehash(&self, user: &User, password: &str) {
        let hasher = self.hasher.clone();
        let directory = Arc::clone(&self.directory);
        let user_id = user.id();
        let prior = user.credential().clone();
        let password = password.to_string();

        tokio::spawn(async move {
            let hashed =
                match tokio::task::spawn_blocking(move || hasher.hash(&password)).await {
                    Ok(Ok(hashed)) => hashed,
                    Ok(Err(e)) => {
                        tracing::warn!(user_id = %user_id, error = %e, "Opportunistic rehash failed");
                        return;
                    }
                    Err(e) => {
                        tracing::warn!(user_id = %user_id, error = %e, "Opportunistic rehash task failed");
                        return;
                    }
                };

            let credential = match Credential::new(hashed) {
                Ok(credential) => credential,
                Err(e) => {
                    tracing::warn!(user_id = %user_id, error = %e, "Rehash produced an unusable credential");
                    return;
                }
            };

            match directory
                .rotate_credential_if_current(&user_id, &prior, &credential)
                .await
            {
                Ok(true) => {
                    tracing::info!(user_id = %user_id, "Credential migrated to current work factor")
                }
                Ok(false) => {
                    tracing::info!(user_id = %user_id, "Credential changed since login; rehash skipped")
                }
                Err(e) => {
                    tracing::warn!(user_id = %user_id, error = %e, "Opportunistic rehash could not be persisted")
                }
            }
        });
    }
}

#[async_trait]
impl<D> AuthServicePort for AuthService<D>
where
    D: UserDirectory,
{
    async fn login(&self, username: &str, password: &str) -> Result<LoginSuccess, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            tracing::warn!("Login attempt with empty username or password");
            return Err(AuthError::InvalidCredentials);
        }

        // Malformed usernames cannot name a real account; collapsing them
        // into the generic failure keeps the enumeration surface closed.
        let username = match Username::new(username.to_string()) {
            Ok(username) => username,
            Err(e) => {
                tracing::warn!(error = %e, "Login attempt with malformed username");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let user = self
            .directory
            .find_by_username(&username)
            .await?
            .ok_or_else(|| {
                tracing::warn!(username = %username, "Login attempt with unknown username");
                AuthError::InvalidCredentials
            })?;

        if !user.is_active() {
            tracing::warn!(username = %username, "Login attempt for deactivated user");
            return Err(AuthError::InvalidCredentials);
        }

        let verified = self
            .verify_blocking(
                password.to_string(),
                user.credential().as_str().to_string(),
            )
            .await?;
        if !verified {
            tracing::warn!(username = %username, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        // Lazy work-factor migration, detached and best-effort
        if self.hasher.needs_rehash(user.credential().as_str()) {
            self.spawn_rehash(&user, password);
        }

        // Best-effort; a failed timestamp write does not fail the login
        if let Err(e) = self.directory.record_login(&user.id(), Utc::now()).await {
            tracing::warn!(user_id = %user.id(), error = %e, "Failed to record login timestamp");
        }

        let tokens = self.tokens.issue_pair(
            &user.id().to_string(),
            user.email().as_str(),
            user.username().as_str(),
            HashMap::new(),
        )?;

        tracing::info!(user_id = %user.id(), username = %user.username(), "Login succeeded");

        let events = vec![UserEvent::LoggedIn(UserLoggedInEvent::new(&user))];
        Ok(LoginSuccess {
            tokens,
            user: PublicUser::from_user(&user),
            events,
        })
    }

    async fn change_password(
        &self,
        access_token: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<Vec<UserEvent>, AuthError> {
        let claims = self.tokens.decode(access_token, TokenType::Access)?;

        let current = Password::new(current_password.to_string())
            .map_err(|e| AuthError::MalformedInput(format!("current password: {e}")))?;
        let new = Password::new(new_password.to_string())
            .map_err(|e| AuthError::MalformedInput(format!("new password: {e}")))?;

        // No-op changes are rejected before any lookup or hashing
        if current == new {
            tracing::warn!(subject = %claims.sub, "Password change rejected: new password equals current");
            return Err(AuthError::MalformedInput(
                "new password must differ from the current password".to_string(),
            ));
        }

        let user_id = UserId::from_string(&claims.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("subject is not a valid user id: {e}")))?;

        let user = self.directory.find_by_id(&user_id).await?.ok_or_else(|| {
            tracing::warn!(subject = %claims.sub, "Token subject does not resolve to a user");
            AuthError::InvalidCredentials
        })?;

        if !user.is_active() {
            tracing::warn!(user_id = %user.id(), "Password change attempt for deactivated user");
            return Err(AuthError::InvalidCredentials);
        }

        let verified = self
            .verify_blocking(
                current.as_str().to_string(),
                user.credential().as_str().to_string(),
            )
            .await?;
        if !verified {
            tracing::warn!(user_id = %user.id(), "Password change attempt with wrong current password");
            return Err(AuthError::InvalidCredentials);
        }

        let hashed = self.hash_blocking(new.as_str().to_string()).await?;
        let credential = Credential::new(hashed).map_err(|e| AuthError::Internal(e.to_string()))?;

        // The only mutation; the adapter commits it atomically
        self.directory.rotate_credential(&user_id, &credential).await?;

        tracing::info!(user_id = %user.id(), username = %user.username(), "Password changed");

        Ok(vec![UserEvent::PasswordChanged(PasswordChangedEvent::new(
            &user,
        ))])
    }

    async fn current_user(&self, access_token: &str) -> Result<PublicUser, AuthError> {
        let claims = self.tokens.decode(access_token, TokenType::Access)?;

        let user_id = UserId::from_string(&claims.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("subject is not a valid user id: {e}")))?;

        let user = self.directory.find_by_id(&user_id).await?.ok_or_else(|| {
            tracing::warn!(subject = %claims.sub, "Token subject does not resolve to a user");
            AuthError::InvalidCredentials
        })?;

        if !user.is_active() {
            tracing::warn!(user_id = %user.id(), "Token presented for deactivated user");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(PublicUser::from_user(&user))
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthError> {
        let access_token = self.tokens.refresh(refresh_token)?;
        Ok(access_token)
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenError;
    use chrono::DateTime;
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::user::errors::DirectoryError;
    use crate::domain::user::models::EmailAddress;

    mock! {
        pub TestUserDirectory {}

        #[async_trait]
        impl UserDirectory for TestUserDirectory {
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DirectoryError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError>;
            async fn rotate_credential(&self, id: &UserId, credential: &Credential) -> Result<(), DirectoryError>;
            async fn rotate_credential_if_current(&self, id: &UserId, expected: &Credential, replacement: &Credential) -> Result<bool, DirectoryError>;
            async fn record_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), DirectoryError>;
        }
    }

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";
    const CURRENT_PASSWORD: &str = "Curr3nt!pass";
    const NEW_PASSWORD: &str = "N3w!password";

    // Low-cost hasher keeps tests fast; minimums match, so fresh hashes do
    // not trigger the rehash path.
    fn hasher() -> PasswordHasher {
        PasswordHasher::with_costs(8192, 1, 1).expect("Failed to build test hasher")
    }

    fn codec() -> Arc<TokenCodec> {
        Arc::new(
            TokenCodec::new(SECRET)
                .with_issuer("identity-service")
                .with_audience("identity-clients"),
        )
    }

    fn stored_user(password: &str, active: bool) -> User {
        let credential = Credential::new(hasher().hash(password).expect("Failed to hash"))
            .expect("Hash is not a valid credential");
        let mut user = User::new(
            Username::new("alice".to_string()).unwrap(),
            EmailAddress::new("a@b.com".to_string()).unwrap(),
            credential,
            "Alice".to_string(),
            Some("Liddell".to_string()),
        );
        if !active {
            user.deactivate();
        }
        user
    }

    fn service(directory: MockTestUserDirectory) -> AuthService<MockTestUserDirectory> {
        AuthService::new(Arc::new(directory), hasher(), codec())
    }

    fn access_token_for(user: &User) -> String {
        codec()
            .issue(
                &user.id().to_string(),
                user.email().as_str(),
                user.username().as_str(),
                TokenType::Access,
                Duration::minutes(5),
                HashMap::new(),
            )
            .expect("Failed to issue access token")
    }

    #[tokio::test]
    async fn test_login_success_issues_decodable_pair() {
        let mut directory = MockTestUserDirectory::new();
        let user = stored_user(CURRENT_PASSWORD, true);
        let returned = user.clone();

        directory
            .expect_find_by_username()
            .withf(|u| u.as_str() == "alice")
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        directory
            .expect_record_login()
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(directory);
        let success = service
            .login("alice", CURRENT_PASSWORD)
            .await
            .expect("Login failed");

        assert_eq!(success.user.username, "alice");
        assert_eq!(success.user.email, "a@b.com");
        assert_eq!(success.tokens.scheme, "Bearer");
        assert_ne!(success.tokens.access_token, success.tokens.refresh_token);

        let claims = codec()
            .decode(&success.tokens.access_token, TokenType::Access)
            .expect("Issued access token does not decode");
        assert_eq!(claims.sub, user.id().to_string());

        assert_eq!(success.events.len(), 1);
        assert_eq!(success.events[0].event_type(), "user_logged_in");
        assert_eq!(success.events[0].user_id(), user.id().to_string());
    }

    #[tokio::test]
    async fn test_login_is_enumeration_resistant() {
        // Unknown user
        let mut directory = MockTestUserDirectory::new();
        directory
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        let unknown_err = service(directory)
            .login("nonexistent", "anything")
            .await
            .unwrap_err();

        // Known user, wrong password
        let mut directory = MockTestUserDirectory::new();
        let user = stored_user(CURRENT_PASSWORD, true);
        directory
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        let wrong_password_err = service(directory)
            .login("alice", "wrong-password")
            .await
            .unwrap_err();

        assert_eq!(unknown_err, AuthError::InvalidCredentials);
        assert_eq!(unknown_err, wrong_password_err);
        assert_eq!(unknown_err.to_string(), wrong_password_err.to_string());
    }

    #[tokio::test]
    async fn test_login_inactive_user_rejected() {
        let mut directory = MockTestUserDirectory::new();
        let user = stored_user(CURRENT_PASSWORD, false);
        directory
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(directory).login("alice", CURRENT_PASSWORD).await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_malformed_username_skips_lookup() {
        let mut directory = MockTestUserDirectory::new();
        directory.expect_find_by_username().times(0);

        let service = service(directory);
        let result = service.login("bad name!", "whatever").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);

        let result = service.login("", "whatever").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);

        let result = service.login("alice", "").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_survives_record_login_failure() {
        let mut directory = MockTestUserDirectory::new();
        let user = stored_user(CURRENT_PASSWORD, true);
        directory
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        directory
            .expect_record_login()
            .times(1)
            .returning(|_, _| Err(DirectoryError::Database("write timeout".to_string())));

        let result = service(directory).login("alice", CURRENT_PASSWORD).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_login_rehashes_weak_credential_best_effort() {
        let weak_hasher = PasswordHasher::with_costs(1024, 1, 1).unwrap();
        let weak_credential =
            Credential::new(weak_hasher.hash(CURRENT_PASSWORD).unwrap()).unwrap();
        let weak_hash = weak_credential.as_str().to_string();
        let mut user = stored_user(CURRENT_PASSWORD, true);
        user.rotate_credential(weak_credential);

        let mut directory = MockTestUserDirectory::new();
        let returned = user.clone();
        directory
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        directory
            .expect_record_login()
            .times(1)
            .returning(|_, _| Ok(()));
        // The migration goes through the conditional swap keyed on the hash
        // the login verified; the unconditional rotation is reserved for the
        // change-password flow. Detached task, so it may or may not land
        // before the assertion, and its outcome never gates the login.
        directory.expect_rotate_credential().times(0);
        directory
            .expect_rotate_credential_if_current()
            .withf(move |_, expected, replacement| {
                expected.as_str() == weak_hash && replacement.as_str() != weak_hash
            })
            .times(0..)
            .returning(|_, _, _| Ok(true));

        let result = service(directory).login("alice", CURRENT_PASSWORD).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_change_password_success() {
        let user = stored_user(CURRENT_PASSWORD, true);
        let token = access_token_for(&user);
        let user_id = user.id();

        let mut directory = MockTestUserDirectory::new();
        let returned = user.clone();
        directory
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        directory
            .expect_rotate_credential()
            .withf(|_, credential| credential.as_str().starts_with("$argon2id$"))
            .times(1)
            .returning(|_, _| Ok(()));

        let events = service(directory)
            .change_password(&token, CURRENT_PASSWORD, NEW_PASSWORD)
            .await
            .expect("Password change failed");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "user_password_changed");
        assert_eq!(events[0].user_id(), user_id.to_string());
    }

    #[tokio::test]
    async fn test_change_password_noop_rejected_without_side_effects() {
        let user = stored_user(CURRENT_PASSWORD, true);
        let token = access_token_for(&user);

        // No directory interaction at all: the rejection happens before any
        // lookup, verification, or hashing.
        let mut directory = MockTestUserDirectory::new();
        directory.expect_find_by_id().times(0);
        directory.expect_rotate_credential().times(0);

        let result = service(directory)
            .change_password(&token, CURRENT_PASSWORD, CURRENT_PASSWORD)
            .await;
        assert!(matches!(result.unwrap_err(), AuthError::MalformedInput(_)));
    }

    #[tokio::test]
    async fn test_change_password_wrong_current_password() {
        let user = stored_user(CURRENT_PASSWORD, true);
        let token = access_token_for(&user);

        let mut directory = MockTestUserDirectory::new();
        let returned = user.clone();
        directory
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        directory.expect_rotate_credential().times(0);

        let result = service(directory)
            .change_password(&token, "Wr0ng!guess99", NEW_PASSWORD)
            .await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_change_password_rejects_weak_new_password() {
        let user = stored_user(CURRENT_PASSWORD, true);
        let token = access_token_for(&user);

        let mut directory = MockTestUserDirectory::new();
        directory.expect_find_by_id().times(0);

        let result = service(directory)
            .change_password(&token, CURRENT_PASSWORD, "weak")
            .await;
        assert!(matches!(result.unwrap_err(), AuthError::MalformedInput(_)));
    }

    #[tokio::test]
    async fn test_change_password_rejects_refresh_token() {
        let user = stored_user(CURRENT_PASSWORD, true);
        let refresh_token = codec()
            .issue(
                &user.id().to_string(),
                "a@b.com",
                "alice",
                TokenType::Refresh,
                Duration::days(7),
                HashMap::new(),
            )
            .unwrap();

        let directory = MockTestUserDirectory::new();
        let result = service(directory)
            .change_password(&refresh_token, CURRENT_PASSWORD, NEW_PASSWORD)
            .await;
        assert!(matches!(result.unwrap_err(), AuthError::TokenInvalid(_)));
    }

    #[tokio::test]
    async fn test_change_password_persistence_failure_surfaces() {
        let user = stored_user(CURRENT_PASSWORD, true);
        let token = access_token_for(&user);

        let mut directory = MockTestUserDirectory::new();
        let returned = user.clone();
        directory
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        directory
            .expect_rotate_credential()
            .times(1)
            .returning(|_, _| Err(DirectoryError::Database("commit failed".to_string())));

        let result = service(directory)
            .change_password(&token, CURRENT_PASSWORD, NEW_PASSWORD)
            .await;
        assert!(matches!(result.unwrap_err(), AuthError::Persistence(_)));
    }

    #[tokio::test]
    async fn test_current_user_success() {
        let user = stored_user(CURRENT_PASSWORD, true);
        let token = access_token_for(&user);
        let user_id = user.id();

        let mut directory = MockTestUserDirectory::new();
        let returned = user.clone();
        directory
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let view = service(directory)
            .current_user(&token)
            .await
            .expect("Failed to resolve current user");
        assert_eq!(view.id, user_id.to_string());
        assert_eq!(view.username, "alice");
    }

    #[tokio::test]
    async fn test_current_user_rejects_refresh_token() {
        let user = stored_user(CURRENT_PASSWORD, true);
        let refresh_token = codec()
            .issue(
                &user.id().to_string(),
                "a@b.com",
                "alice",
                TokenType::Refresh,
                Duration::days(7),
                HashMap::new(),
            )
            .unwrap();

        let directory = MockTestUserDirectory::new();
        let result = service(directory).current_user(&refresh_token).await;
        assert!(matches!(result.unwrap_err(), AuthError::TokenInvalid(_)));
    }

    #[tokio::test]
    async fn test_current_user_expired_token() {
        let user = stored_user(CURRENT_PASSWORD, true);
        let expired = Arc::new(TokenCodec::new(SECRET).with_leeway(0))
            .issue(
                &user.id().to_string(),
                "a@b.com",
                "alice",
                TokenType::Access,
                Duration::seconds(-60),
                HashMap::new(),
            )
            .unwrap();

        let directory = MockTestUserDirectory::new();
        // Service codec has a 10s leeway; a token 60s past expiry is
        // rejected regardless.
        let result = service(directory).current_user(&expired).await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::TokenExpired | AuthError::TokenInvalid(_)
        ));
    }

    #[tokio::test]
    async fn test_current_user_missing_or_inactive() {
        let user = stored_user(CURRENT_PASSWORD, true);
        let token = access_token_for(&user);

        let mut directory = MockTestUserDirectory::new();
        directory
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        let missing = service(directory).current_user(&token).await;
        assert_eq!(missing.unwrap_err(), AuthError::InvalidCredentials);

        let inactive_user = stored_user(CURRENT_PASSWORD, false);
        let token = access_token_for(&inactive_user);
        let mut directory = MockTestUserDirectory::new();
        let returned = inactive_user.clone();
        directory
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        let inactive = service(directory).current_user(&token).await;
        assert_eq!(inactive.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_refresh_access_token() {
        let directory = MockTestUserDirectory::new();
        let service = service(directory);

        let pair = codec()
            .issue_pair("u-1", "a@b.com", "alice", HashMap::new())
            .unwrap();

        let renewed = service
            .refresh_access_token(&pair.refresh_token)
            .await
            .expect("Refresh failed");
        let claims = codec().decode(&renewed, TokenType::Access).unwrap();
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.username, "alice");

        // An access token cannot mint new access tokens
        let result = service.refresh_access_token(&pair.access_token).await;
        assert!(matches!(result.unwrap_err(), AuthError::TokenInvalid(_)));
    }

    #[tokio::test]
    async fn test_token_error_mapping_through_refresh() {
        let directory = MockTestUserDirectory::new();
        let service = service(directory);

        let result = service.refresh_access_token("not.a.token").await;
        assert!(matches!(result.unwrap_err(), AuthError::TokenInvalid(_)));

        let expired_codec = TokenCodec::new(SECRET)
            .with_issuer("identity-service")
            .with_audience("identity-clients");
        let expired = expired_codec
            .issue(
                "u-1",
                "a@b.com",
                "alice",
                TokenType::Refresh,
                Duration::seconds(-60),
                HashMap::new(),
            )
            .unwrap();
        let result = service.refresh_access_token(&expired).await;
        assert_eq!(result.unwrap_err(), AuthError::TokenExpired);
    }

    #[test]
    fn test_token_error_into_auth_error() {
        let err: AuthError = TokenError::TokenExpired.into();
        assert_eq!(err, AuthError::TokenExpired);
    }
}
