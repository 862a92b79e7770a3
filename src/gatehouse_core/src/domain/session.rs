use serde::Serialize;

use crate::domain::{auth_error::AuthErrorKind, user_profile::UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Pending,
    Authenticated,
    Failed,
}

/// The process-wide view of who is signed in.
///
/// Only constructible through the named states, so `user` is present exactly
/// when `status` is `Authenticated`, and `error` exactly when it is `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    user: Option<UserProfile>,
    status: SessionStatus,
    error: Option<AuthErrorKind>,
}

impl Session {
    pub fn idle() -> Self {
        Self {
            user: None,
            status: SessionStatus::Idle,
            error: None,
        }
    }

    pub fn pending() -> Self {
        Self {
            user: None,
            status: SessionStatus::Pending,
            error: None,
        }
    }

    pub fn authenticated(user: UserProfile) -> Self {
        Self {
            user: Some(user),
            status: SessionStatus::Authenticated,
            error: None,
        }
    }

    pub fn failed(error: AuthErrorKind) -> Self {
        Self {
            user: None,
            status: SessionStatus::Failed,
            error: Some(error),
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn error(&self) -> Option<AuthErrorKind> {
        self.error
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::idle()
    }
}
