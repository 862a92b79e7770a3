//! Observable holder of the current [`Session`].
//!
//! Readers get immutable snapshots and never see a half-written session.
//! Writers are serialised; subscribers are called synchronously, in
//! registration order, after each committed change. Delivery happens before the
//! writer lock is released, so every listener sees changes in commit order even
//! with writers on several threads. The lock is reentrant: a listener may read
//! from or write to the store, and a change it makes is delivered before the
//! outer delivery finishes.
//!
//! Form submissions go through [`SubmissionTicket`]s: a ticket is only honoured
//! while it is the submission the store is waiting on, so results arriving
//! after a cancel, a logout or a newer submission are dropped.

use std::{
    cell::RefCell,
    sync::{Arc, Weak},
};

use arc_swap::ArcSwap;
use parking_lot::{Mutex, ReentrantMutex};
use thiserror::Error;

use crate::domain::{auth_error::AuthErrorKind, session::Session, user_profile::UserProfile};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionStoreError {
    #[error("A submission is already in flight")]
    SubmissionInFlight,
    #[error("Submission was superseded")]
    Superseded,
}

/// Identifies one in-flight submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    generation: u64,
}

type Listener = dyn Fn(&Session) + Send + Sync;

#[derive(Default)]
struct WriterState {
    generation: u64,
    pending: Option<u64>,
}

impl WriterState {
    /// Invalidate every ticket handed out so far.
    fn supersede(&mut self) {
        self.generation += 1;
        self.pending = None;
    }
}

#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(u64, Arc<Listener>)>,
}

pub struct SessionStore {
    current: ArcSwap<Session>,
    writer: ReentrantMutex<RefCell<WriterState>>,
    registry: Arc<Mutex<ListenerRegistry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(Session::idle()),
            writer: ReentrantMutex::new(RefCell::new(WriterState::default())),
            registry: Arc::new(Mutex::new(ListenerRegistry::default())),
        }
    }

    /// Current snapshot.
    pub fn get(&self) -> Arc<Session> {
        self.current.load_full()
    }

    /// Mark `user` as signed in. Supersedes any in-flight submission.
    pub fn set(&self, user: UserProfile) -> Arc<Session> {
        let writer = self.writer.lock();
        writer.borrow_mut().supersede();
        self.publish(Session::authenticated(user))
    }

    /// Return to `Idle` with no user. Supersedes any in-flight submission.
    pub fn clear(&self) -> Arc<Session> {
        let writer = self.writer.lock();
        writer.borrow_mut().supersede();
        self.publish(Session::idle())
    }

    /// Move to `Pending` and hand out the ticket for this submission.
    pub fn begin_submission(&self) -> Result<SubmissionTicket, SessionStoreError> {
        let writer = self.writer.lock();
        let ticket = {
            let mut state = writer.borrow_mut();
            if state.pending.is_some() {
                return Err(SessionStoreError::SubmissionInFlight);
            }
            state.generation += 1;
            state.pending = Some(state.generation);
            SubmissionTicket {
                generation: state.generation,
            }
        };

        self.publish(Session::pending());
        Ok(ticket)
    }

    /// Settle a submission: `Ok` signs the user in, `Err` records the failure.
    pub fn resolve(
        &self,
        ticket: SubmissionTicket,
        outcome: Result<UserProfile, AuthErrorKind>,
    ) -> Result<Arc<Session>, SessionStoreError> {
        let writer = self.writer.lock();
        {
            let mut state = writer.borrow_mut();
            if state.pending != Some(ticket.generation) {
                return Err(SessionStoreError::Superseded);
            }
            state.pending = None;
        }

        let next = match outcome {
            Ok(user) => Session::authenticated(user),
            Err(kind) => Session::failed(kind),
        };
        Ok(self.publish(next))
    }

    /// Abandon a submission whose view has gone away. Its result will be ignored.
    pub fn cancel(&self, ticket: SubmissionTicket) -> Result<Arc<Session>, SessionStoreError> {
        let writer = self.writer.lock();
        {
            let mut state = writer.borrow_mut();
            if state.pending != Some(ticket.generation) {
                return Err(SessionStoreError::Superseded);
            }
            state.supersede();
        }

        Ok(self.publish(Session::idle()))
    }

    /// Abandon whichever submission is in flight. `None` if nothing was pending.
    pub fn cancel_pending(&self) -> Option<Arc<Session>> {
        let writer = self.writer.lock();
        {
            let mut state = writer.borrow_mut();
            state.pending?;
            state.supersede();
        }

        Some(self.publish(Session::idle()))
    }

    /// Register a listener called after every committed change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Store `next` and deliver it. Callers hold the writer lock.
    fn publish(&self, next: Session) -> Arc<Session> {
        let snapshot = Arc::new(next);
        self.current.store(Arc::clone(&snapshot));
        self.notify(&snapshot);
        snapshot
    }

    fn notify(&self, snapshot: &Session) {
        let listeners: Vec<Arc<Listener>> = self
            .registry
            .lock()
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(snapshot);
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by [`SessionStore::subscribe`]. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<ListenerRegistry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}

    /// Keep the listener registered for the lifetime of the store.
    pub fn detach(mut self) {
        self.registry = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}
