use std::sync::Arc;

use gatehouse_application::SessionContext;
use gatehouse_core::{AuthGateway, ProfileStore, SessionPersistence, ViewRouter};

/// Everything a route needs to run the session use cases.
pub trait SessionState: Clone + Send + Sync + 'static {
    type Gateway: AuthGateway + 'static;
    type Profiles: ProfileStore + 'static;
    type Persistence: SessionPersistence + 'static;
    type Router: ViewRouter + 'static;

    fn gateway(&self) -> &Self::Gateway;
    fn profile_store(&self) -> &Self::Profiles;
    fn context(&self) -> &SessionContext<Self::Persistence, Self::Router>;
}

pub struct AppState<G, S, P, R> {
    gateway: Arc<G>,
    profile_store: Arc<S>,
    context: Arc<SessionContext<P, R>>,
}

impl<G, S, P, R> AppState<G, S, P, R> {
    pub fn new(gateway: G, profile_store: S, context: Arc<SessionContext<P, R>>) -> Self {
        Self {
            gateway: Arc::new(gateway),
            profile_store: Arc::new(profile_store),
            context,
        }
    }
}

impl<G, S, P, R> Clone for AppState<G, S, P, R> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            profile_store: Arc::clone(&self.profile_store),
            context: Arc::clone(&self.context),
        }
    }
}

impl<G, S, P, R> SessionState for AppState<G, S, P, R>
where
    G: AuthGateway + 'static,
    S: ProfileStore + 'static,
    P: SessionPersistence + 'static,
    R: ViewRouter + 'static,
{
    type Gateway = G;
    type Profiles = S;
    type Persistence = P;
    type Router = R;

    fn gateway(&self) -> &G {
        &self.gateway
    }

    fn profile_store(&self) -> &S {
        &self.profile_store
    }

    fn context(&self) -> &SessionContext<P, R> {
        &self.context
    }
}
