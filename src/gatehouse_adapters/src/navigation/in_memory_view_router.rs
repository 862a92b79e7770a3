use std::sync::Arc;

use gatehouse_core::ViewRouter;
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct RouterState {
    location: String,
    redirects: Vec<String>,
}

/// Tracks the visible view for hosts without a real router.
///
/// Clones share state, so a handler can move the user while the navigator
/// watches the same location.
#[derive(Debug, Clone, Default)]
pub struct InMemoryViewRouter {
    state: Arc<Mutex<RouterState>>,
}

impl InMemoryViewRouter {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(RouterState {
                location: initial_path.into(),
                redirects: Vec::new(),
            })),
        }
    }

    /// User-initiated navigation. Not recorded as a redirect.
    pub fn navigate(&self, path: impl Into<String>) {
        self.state.lock().location = path.into();
    }

    /// Redirects issued so far, oldest first.
    pub fn redirects(&self) -> Vec<String> {
        self.state.lock().redirects.clone()
    }
}

impl ViewRouter for InMemoryViewRouter {
    fn current_path(&self) -> String {
        self.state.lock().location.clone()
    }

    fn redirect(&self, path: &str) {
        let mut state = self.state.lock();
        state.location = path.to_owned();
        state.redirects.push(path.to_owned());
    }
}
