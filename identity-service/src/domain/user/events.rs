use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::User;

/// Envelope for the domain events emitted by authentication flows.
///
/// Flows return emitted events alongside their result; entities never hold a
/// mutable event list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    LoggedIn(UserLoggedInEvent),
    PasswordChanged(PasswordChangedEvent),
}

impl UserEvent {
    /// Extract the unique event identifier.
    pub fn event_id(&self) -> &str {
        match self {
            UserEvent::LoggedIn(e) => &e.event_id,
            UserEvent::PasswordChanged(e) => &e.event_id,
        }
    }

    /// Get the event type name.
    pub fn event_type(&self) -> &str {
        match self {
            UserEvent::LoggedIn(_) => "user_logged_in",
            UserEvent::PasswordChanged(_) => "user_password_changed",
        }
    }

    /// Extract the user ID this event relates to.
    pub fn user_id(&self) -> &str {
        match self {
            UserEvent::LoggedIn(e) => &e.user_id,
            UserEvent::PasswordChanged(e) => &e.user_id,
        }
    }
}

/// Domain event emitted on successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLoggedInEvent {
    pub event_id: String,
    pub user_id: String,
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

impl UserLoggedInEvent {
    pub fn new(user: &User) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            user_id: user.id().to_string(),
            username: user.username().as_str().to_string(),
            logged_in_at: Utc::now(),
        }
    }
}

/// Domain event emitted when a user's credential is rotated.
///
/// Carries no credential material, only the fact of the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChangedEvent {
    pub event_id: String,
    pub user_id: String,
    pub username: String,
    pub changed_at: DateTime<Utc>,
}

impl PasswordChangedEvent {
    pub fn new(user: &User) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            user_id: user.id().to_string(),
            username: user.username().as_str().to_string(),
            changed_at: Utc::now(),
        }
    }
}
