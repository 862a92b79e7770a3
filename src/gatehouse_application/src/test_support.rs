//! Hand-written port mocks shared by the use case tests.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use gatehouse_core::{
    AuthError, AuthGateway, Credential, Email, PersistenceError, ProfileStore, ProfileWriteError,
    SessionPersistence, SessionStore, UserProfile, ViewRouter,
};
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::{
    navigator::{Navigator, RoutePolicy},
    session_context::SessionContext,
};

pub fn profile(id: &str, email: &str, display_name: &str) -> UserProfile {
    UserProfile::new(id, Email::parse(email).unwrap(), display_name)
}

/// Lets a test park a gateway call until it decides to release it.
#[derive(Clone, Default)]
pub struct Hold {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

pub struct MockAuthGateway {
    result: Result<UserProfile, AuthError>,
    calls: AtomicUsize,
    hold: Option<Hold>,
}

impl MockAuthGateway {
    pub fn succeeding(profile: UserProfile) -> Self {
        Self {
            result: Ok(profile),
            calls: AtomicUsize::new(0),
            hold: None,
        }
    }

    pub fn failing(error: AuthError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
            hold: None,
        }
    }

    pub fn held(mut self, hold: Hold) -> Self {
        self.hold = Some(hold);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond(&self) -> Result<UserProfile, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(hold) = &self.hold {
            hold.entered.notify_one();
            hold.release.notified().await;
        }
        self.result.clone()
    }
}

#[async_trait::async_trait]
impl AuthGateway for MockAuthGateway {
    async fn register(&self, _credential: Credential) -> Result<UserProfile, AuthError> {
        self.respond().await
    }

    async fn authenticate(&self, _credential: Credential) -> Result<UserProfile, AuthError> {
        self.respond().await
    }
}

#[derive(Default)]
pub struct MockProfileStore {
    pub fail: bool,
    pub writes: Mutex<Vec<UserProfile>>,
}

#[async_trait::async_trait]
impl ProfileStore for MockProfileStore {
    async fn write(&self, profile: &UserProfile) -> Result<(), ProfileWriteError> {
        if self.fail {
            return Err(ProfileWriteError::Unavailable("document store offline".into()));
        }
        self.writes.lock().push(profile.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockSessionPersistence {
    pub record: Mutex<Option<UserProfile>>,
    pub fail_writes: bool,
    pub corrupt: bool,
    pub saves: AtomicUsize,
    pub clears: AtomicUsize,
    /// Parks every `save` until released.
    pub save_hold: Option<Hold>,
}

impl MockSessionPersistence {
    pub fn holding(profile: UserProfile) -> Self {
        Self {
            record: Mutex::new(Some(profile)),
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
impl SessionPersistence for MockSessionPersistence {
    async fn save(&self, profile: &UserProfile) -> Result<(), PersistenceError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if let Some(hold) = &self.save_hold {
            hold.entered.notify_one();
            hold.release.notified().await;
        }
        if self.fail_writes {
            return Err(PersistenceError::Io("disk full".into()));
        }
        *self.record.lock() = Some(profile.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<UserProfile>, PersistenceError> {
        if self.corrupt {
            return Err(PersistenceError::Corrupt("expected value at line 1".into()));
        }
        Ok(self.record.lock().clone())
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(PersistenceError::Io("disk full".into()));
        }
        *self.record.lock() = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockViewRouter {
    pub location: Mutex<String>,
    pub redirects: Mutex<Vec<String>>,
}

impl MockViewRouter {
    pub fn at(path: &str) -> Self {
        Self {
            location: Mutex::new(path.to_string()),
            redirects: Mutex::default(),
        }
    }
}

impl ViewRouter for MockViewRouter {
    fn current_path(&self) -> String {
        self.location.lock().clone()
    }

    fn redirect(&self, path: &str) {
        *self.location.lock() = path.to_string();
        self.redirects.lock().push(path.to_string());
    }
}

pub type TestContext = SessionContext<MockSessionPersistence, MockViewRouter>;

pub fn context_with(persistence: MockSessionPersistence, path: &str) -> TestContext {
    SessionContext::new(
        Arc::new(SessionStore::new()),
        persistence,
        Navigator::new(RoutePolicy::default(), MockViewRouter::at(path)),
    )
}

pub fn context_at(path: &str) -> TestContext {
    context_with(MockSessionPersistence::default(), path)
}
