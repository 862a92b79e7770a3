//! Routing reactions to session changes.

use gatehouse_core::{Session, SessionStatus, ViewRouter};
use serde::Deserialize;

/// Which views need a signed-in user, and where to send people.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoutePolicy {
    pub public_entry: String,
    pub protected_landing: String,
    pub protected_paths: Vec<String>,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            public_entry: "/login".to_string(),
            protected_landing: "/base".to_string(),
            protected_paths: vec!["/base".to_string(), "/addQuiz".to_string()],
        }
    }
}

impl RoutePolicy {
    /// A path is protected when it is one of `protected_paths` or nested below one.
    /// Query strings and fragments are ignored.
    pub fn is_protected(&self, path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        self.protected_paths.iter().any(|protected| {
            let protected = protected.trim_end_matches('/');
            match path.strip_prefix(protected) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            }
        })
    }
}

/// Outcome of gating a request for `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Redirect(String),
}

/// Sends the user to the right view when the session changes.
pub struct Navigator<R> {
    policy: RoutePolicy,
    router: R,
}

impl<R> Navigator<R>
where
    R: ViewRouter,
{
    pub fn new(policy: RoutePolicy, router: R) -> Self {
        Self { policy, router }
    }

    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// React to a committed session.
    ///
    /// `Pending` is ignored so the view does not flicker mid-request. A signed-in
    /// user already on a protected view stays there.
    pub fn on_transition(&self, session: &Session) {
        let current = self.router.current_path();

        let target = match session.status() {
            SessionStatus::Pending => None,
            SessionStatus::Authenticated if !self.policy.is_protected(&current) => {
                Some(&self.policy.protected_landing)
            }
            SessionStatus::Authenticated => None,
            SessionStatus::Idle | SessionStatus::Failed if self.policy.is_protected(&current) => {
                Some(&self.policy.public_entry)
            }
            SessionStatus::Idle | SessionStatus::Failed => None,
        };

        if let Some(target) = target {
            tracing::debug!(from = %current, to = %target, status = ?session.status(), "Redirecting");
            self.router.redirect(target);
        }
    }

    /// Decide whether `path` may render for `session`.
    pub fn guard(&self, path: &str, session: &Session) -> RouteDecision {
        if self.policy.is_protected(path) && !session.is_authenticated() {
            RouteDecision::Redirect(self.policy.public_entry.clone())
        } else {
            RouteDecision::Render
        }
    }
}
