use std::sync::Arc;

use gatehouse_core::{PersistenceError, Session, SessionPersistence, ViewRouter};

use crate::session_context::SessionContext;

/// Response from logout use case
#[derive(Debug)]
pub struct LogoutResponse {
    pub session: Arc<Session>,
    pub persistence: Option<PersistenceError>,
}

/// Logout use case - forgets the signed-in user in memory and on disk
pub struct LogoutUseCase<'a, P, R>
where
    P: SessionPersistence,
    R: ViewRouter,
{
    context: &'a SessionContext<P, R>,
}

impl<'a, P, R> LogoutUseCase<'a, P, R>
where
    P: SessionPersistence,
    R: ViewRouter,
{
    pub fn new(context: &'a SessionContext<P, R>) -> Self {
        Self { context }
    }

    /// Execute the logout use case
    ///
    /// Logging out cannot fail; a persistence failure is reported alongside the idle session.
    #[tracing::instrument(name = "LogoutUseCase::execute", skip(self))]
    pub async fn execute(&self) -> LogoutResponse {
        let (session, persistence) = self.context.logout().await;
        LogoutResponse {
            session,
            persistence,
        }
    }
}
