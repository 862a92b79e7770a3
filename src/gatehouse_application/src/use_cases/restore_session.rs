use std::sync::Arc;

use gatehouse_core::{Session, SessionPersistence, ViewRouter};

use crate::session_context::SessionContext;

/// Restore session use case - seeds the store from the persisted record at startup
pub struct RestoreSessionUseCase<'a, P, R>
where
    P: SessionPersistence,
    R: ViewRouter,
{
    context: &'a SessionContext<P, R>,
}

impl<'a, P, R> RestoreSessionUseCase<'a, P, R>
where
    P: SessionPersistence,
    R: ViewRouter,
{
    pub fn new(context: &'a SessionContext<P, R>) -> Self {
        Self { context }
    }

    /// Execute the restore session use case
    ///
    /// An unreadable record is discarded and the session starts signed out.
    pub async fn execute(&self) -> Arc<Session> {
        self.context.restore().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockSessionPersistence, context_with, profile};
    use gatehouse_core::SessionStatus;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_restore_seeds_store_before_routing() {
        let persistence = MockSessionPersistence::holding(profile("uid-1", "x@y.com", "X"));
        let context = context_with(persistence, "/");

        let session = RestoreSessionUseCase::new(&context).execute().await;

        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert_eq!(session.user().unwrap().id(), "uid-1");
        assert_eq!(context.navigator().router().current_path(), "/base");
        // Restoring does not write the record back
        assert_eq!(context.persistence().saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_restore_without_record_gates_protected_view() {
        let context = context_with(MockSessionPersistence::default(), "/addQuiz");

        let session = RestoreSessionUseCase::new(&context).execute().await;

        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(context.navigator().router().current_path(), "/login");
    }

    #[tokio::test]
    async fn test_corrupt_record_is_discarded() {
        let persistence = MockSessionPersistence {
            corrupt: true,
            ..Default::default()
        };
        let context = context_with(persistence, "/login");

        let session = RestoreSessionUseCase::new(&context).execute().await;

        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(context.persistence().clears.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_restore_runs_once() {
        let persistence = MockSessionPersistence::holding(profile("uid-1", "x@y.com", "X"));
        let context = context_with(persistence, "/login");
        let use_case = RestoreSessionUseCase::new(&context);

        use_case.execute().await;
        context.logout().await;
        *context.persistence().record.lock() = Some(profile("uid-2", "z@y.com", "Z"));

        let session = use_case.execute().await;
        assert_eq!(session.status(), SessionStatus::Idle);
    }
}
