use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::errors::DirectoryError;
use crate::domain::user::models::Credential;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserDirectory;

const USER_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
     is_active, created_at, updated_at, last_login_at";

/// Postgres-backed implementation of the user directory port.
///
/// Queries use the runtime API so the crate builds without a database
/// connection. Expects a `users` table matching the columns below; schema
/// management lives with the deployment.
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<User, DirectoryError> {
        let id: Uuid = Self::column(row, "id")?;
        let username: String = Self::column(row, "username")?;
        let email: String = Self::column(row, "email")?;
        let password_hash: String = Self::column(row, "password_hash")?;
        let first_name: String = Self::column(row, "first_name")?;
        let last_name: Option<String> = Self::column(row, "last_name")?;
        let is_active: bool = Self::column(row, "is_active")?;
        let created_at: DateTime<Utc> = Self::column(row, "created_at")?;
        let updated_at: DateTime<Utc> = Self::column(row, "updated_at")?;
        let last_login_at: Option<DateTime<Utc>> = Self::column(row, "last_login_at")?;

        // A stored row that fails domain validation is data corruption, not
        // a lookup miss.
        let username = Username::new(username)
            .map_err(|e| DirectoryError::Database(format!("corrupt username column: {e}")))?;
        let email = EmailAddress::new(email)
            .map_err(|e| DirectoryError::Database(format!("corrupt email column: {e}")))?;
        let credential = Credential::new(password_hash)
            .map_err(|e| DirectoryError::Database(format!("corrupt password_hash column: {e}")))?;

        Ok(User::restore(
            UserId(id),
            username,
            email,
            credential,
            first_name,
            last_name,
            is_active,
            created_at,
            updated_at,
            last_login_at,
        ))
    }

    fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DirectoryError>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
    {
        row.try_get(name)
            .map_err(|e| DirectoryError::Database(e.to_string()))
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Database(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DirectoryError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Database(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Database(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn rotate_credential(
        &self,
        id: &UserId,
        credential: &Credential,
    ) -> Result<(), DirectoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DirectoryError::Database(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.0)
        .bind(credential.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| DirectoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| DirectoryError::Database(e.to_string()))?;
            return Err(DirectoryError::NotFound(id.to_string()));
        }

        tx.commit()
            .await
            .map_err(|e| DirectoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn rotate_credential_if_current(
        &self,
        id: &UserId,
        expected: &Credential,
        replacement: &Credential,
    ) -> Result<bool, DirectoryError> {
        // Single-statement compare-and-swap; zero rows means the credential
        // moved on and the caller skips the write.
        let result = sqlx::query(
            "UPDATE users SET password_hash = $3, updated_at = NOW() \
             WHERE id = $1 AND password_hash = $2",
        )
        .bind(id.0)
        .bind(expected.as_str())
        .bind(replacement.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DirectoryError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), DirectoryError> {
        let result = sqlx::query("UPDATE users SET last_login_at = $2 WHERE id = $1")
            .bind(id.0)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| DirectoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DirectoryError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
