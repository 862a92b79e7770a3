use axum::{Json, extract::State};
use gatehouse_core::{AuthErrorKind, Session, SessionStatus, UserProfile, ViewRouter};
use serde::Serialize;

use crate::state::SessionState;

/// Session snapshot returned by every route, plus where the view ended up.
#[derive(Debug, Serialize)]
pub struct SessionBody {
    pub status: SessionStatus,
    pub user: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AuthErrorKind>,
    pub redirect: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl SessionBody {
    pub fn new(session: &Session, redirect: String) -> Self {
        Self {
            status: session.status(),
            user: session.user().cloned(),
            error: session.error(),
            redirect,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

#[tracing::instrument(name = "Session", skip_all)]
pub async fn session<S>(State(state): State<S>) -> Json<SessionBody>
where
    S: SessionState,
{
    let context = state.context();
    Json(SessionBody::new(
        &context.session(),
        context.navigator().router().current_path(),
    ))
}
