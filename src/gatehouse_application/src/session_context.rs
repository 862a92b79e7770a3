//! Application root for the signed-in state.
//!
//! Owns the [`SessionStore`], its durable mirror and the [`Navigator`], and
//! applies every transition in the same order: store, then persistence, then
//! navigation. Transitions are serialized, so a later one never lands between
//! another's store update and its persistence write. Persistence failures are
//! logged and reported, never rolled back.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use gatehouse_core::{
    AuthErrorKind, PersistenceError, ProfileWriteError, Session, SessionPersistence,
    SessionStatus, SessionStore, SessionStoreError, SubmissionTicket, UserProfile, ViewRouter,
};
use tokio::sync::Mutex;

use crate::navigator::Navigator;

/// Non-fatal failures recorded while syncing a transition.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub profile_write: Option<ProfileWriteError>,
    pub persistence: Option<PersistenceError>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.profile_write.is_none() && self.persistence.is_none()
    }
}

/// A submission that has moved the store to `Pending`.
///
/// Settled by [`SessionContext::commit`], [`SessionContext::reject`] or
/// [`SessionContext::cancel`]. Dropping it unsettled, for example when the
/// request future is abandoned, cancels the submission so the store does not
/// stay `Pending`.
#[must_use = "dropping a Submission cancels it"]
pub struct Submission<'a, P, R>
where
    P: SessionPersistence,
    R: ViewRouter,
{
    context: &'a SessionContext<P, R>,
    ticket: SubmissionTicket,
    settled: bool,
}

impl<P, R> Submission<'_, P, R>
where
    P: SessionPersistence,
    R: ViewRouter,
{
    pub fn ticket(&self) -> SubmissionTicket {
        self.ticket
    }

    fn settle(mut self) -> SubmissionTicket {
        self.settled = true;
        self.ticket
    }
}

impl<P, R> Drop for Submission<'_, P, R>
where
    P: SessionPersistence,
    R: ViewRouter,
{
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        // Nothing was persisted for Pending, so only the store and the view need resetting
        if let Ok(session) = self.context.store.cancel(self.ticket) {
            tracing::warn!("Submission abandoned before it settled, returning to idle");
            self.context.navigator.on_transition(&session);
        }
    }
}

pub struct SessionContext<P, R> {
    store: Arc<SessionStore>,
    persistence: P,
    navigator: Navigator<R>,
    restored: AtomicBool,
    transitions: Mutex<()>,
}

impl<P, R> SessionContext<P, R>
where
    P: SessionPersistence,
    R: ViewRouter,
{
    pub fn new(store: Arc<SessionStore>, persistence: P, navigator: Navigator<R>) -> Self {
        Self {
            store,
            persistence,
            navigator,
            restored: AtomicBool::new(false),
            transitions: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn navigator(&self) -> &Navigator<R> {
        &self.navigator
    }

    pub fn session(&self) -> Arc<Session> {
        self.store.get()
    }

    /// Seed the store from persistence and make the first routing decision.
    ///
    /// Runs once per context; later calls return the current session untouched.
    #[tracing::instrument(name = "SessionContext::restore", skip(self))]
    pub async fn restore(&self) -> Arc<Session> {
        if self.restored.swap(true, Ordering::SeqCst) {
            tracing::warn!("Session already restored, ignoring");
            return self.store.get();
        }

        let _transition = self.transitions.lock().await;
        match self.persistence.load().await {
            Ok(Some(profile)) => {
                tracing::info!(user_id = %profile.id(), "Restored persisted session");
                self.store.set(profile);
            }
            Ok(None) => tracing::debug!("No persisted session"),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable persisted session");
                if let Err(e) = self.persistence.clear().await {
                    tracing::error!(error = %e, "Failed to clear unreadable persisted session");
                }
            }
        }

        let session = self.store.get();
        self.navigator.on_transition(&session);
        session
    }

    pub fn begin_submission(&self) -> Result<Submission<'_, P, R>, SessionStoreError> {
        let ticket = self.store.begin_submission()?;
        Ok(Submission {
            context: self,
            ticket,
            settled: false,
        })
    }

    /// Sign `profile` in for `submission`.
    pub async fn commit(
        &self,
        submission: Submission<'_, P, R>,
        profile: UserProfile,
    ) -> Result<(Arc<Session>, Option<PersistenceError>), SessionStoreError> {
        let _transition = self.transitions.lock().await;
        let session = self
            .store
            .resolve(submission.settle(), Ok(profile))
            .inspect_err(|_| {
                tracing::warn!("Ignoring result of superseded submission");
            })?;
        let persistence = self.sync(&session).await;
        Ok((session, persistence))
    }

    /// Record a failed submission. The user stays signed out.
    pub async fn reject(
        &self,
        submission: Submission<'_, P, R>,
        kind: AuthErrorKind,
    ) -> Result<Arc<Session>, SessionStoreError> {
        let _transition = self.transitions.lock().await;
        let session = self
            .store
            .resolve(submission.settle(), Err(kind))
            .inspect_err(|_| {
                tracing::warn!(?kind, "Ignoring failure of superseded submission");
            })?;
        self.sync(&session).await;
        Ok(session)
    }

    /// Abandon `submission` because the view that submitted it has gone away.
    pub async fn cancel(
        &self,
        submission: Submission<'_, P, R>,
    ) -> Result<Arc<Session>, SessionStoreError> {
        let _transition = self.transitions.lock().await;
        let session = self.store.cancel(submission.settle())?;
        self.sync(&session).await;
        Ok(session)
    }

    /// Abandon whatever submission is in flight, if any.
    pub async fn cancel_pending(&self) -> Option<Arc<Session>> {
        let _transition = self.transitions.lock().await;
        let session = self.store.cancel_pending()?;
        tracing::info!("Cancelled in-flight submission");
        self.sync(&session).await;
        Some(session)
    }

    #[tracing::instrument(name = "SessionContext::logout", skip(self))]
    pub async fn logout(&self) -> (Arc<Session>, Option<PersistenceError>) {
        let _transition = self.transitions.lock().await;
        let session = self.store.clear();
        let persistence = self.sync(&session).await;
        (session, persistence)
    }

    /// Mirror `session` into persistence, then let the navigator react.
    async fn sync(&self, session: &Session) -> Option<PersistenceError> {
        let result = match (session.status(), session.user()) {
            (SessionStatus::Authenticated, Some(user)) => self.persistence.save(user).await,
            (SessionStatus::Pending, _) => Ok(()),
            _ => self.persistence.clear().await,
        };

        let failure = result
            .inspect_err(|e| {
                tracing::error!(
                    error = %e,
                    status = ?session.status(),
                    "Failed to persist session, continuing with in-memory state"
                );
            })
            .err();

        self.navigator.on_transition(session);
        failure
    }
}
