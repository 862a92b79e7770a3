use std::path::PathBuf;

use axum::{
    Router,
    http::{HeaderValue, Method, request},
    middleware::from_fn_with_state,
    routing::{get, post},
};
use gatehouse_axum::{
    SessionState, guard_protected_paths, require_session,
    routes::{login, logout, register, session},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Origins allowed to call the service from a browser.
#[derive(Debug, Clone, Default)]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    /// Origins that are not valid header values are skipped with a warning.
    pub fn parse<I, T>(origins: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let origins = origins
            .into_iter()
            .filter_map(|origin| {
                let origin = origin.as_ref();
                HeaderValue::from_str(origin)
                    .inspect_err(|_| tracing::warn!(%origin, "Ignoring invalid allowed origin"))
                    .ok()
            })
            .collect();
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.contains(origin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Session routes plus whatever protected routes the host application mounts.
pub struct SessionService<S> {
    state: S,
    router: Router<S>,
    assets_dir: Option<PathBuf>,
}

impl<S> SessionService<S>
where
    S: SessionState,
{
    /// Create the service with the sign-in, registration, sign-out and
    /// snapshot routes.
    pub fn new(state: S) -> Self {
        let router = Router::new()
            .route("/login", post(login::<S>))
            .route("/register", post(register::<S>))
            .route("/logout", post(logout::<S>))
            .route("/session", get(session::<S>));

        Self {
            state,
            router,
            assets_dir: None,
        }
    }

    /// Mount routes that only signed-in users may reach.
    ///
    /// `routes` must contain at least one route.
    pub fn with_protected_routes(mut self, routes: Router<S>) -> Self {
        let guarded = routes.route_layer(from_fn_with_state(
            self.state.clone(),
            require_session::<S>,
        ));
        self.router = self.router.merge(guarded);
        self
    }

    /// Serve a single page app from `assets_dir` for every other path.
    pub fn with_assets(mut self, assets_dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(assets_dir.into());
        self
    }

    fn with_trace_layer(router: Router) -> Router {
        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        )
    }

    /// Convert the service into a router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(self, allowed_origins: Option<AllowedOrigins>) -> Router {
        let mut router = self.router;

        if let Some(assets_dir) = self.assets_dir {
            let index = assets_dir.join("index.html");
            router = router.fallback_service(ServeDir::new(assets_dir).fallback(ServeFile::new(index)));
        }

        // Applied last so the asset fallback is gated too
        let mut router = router
            .layer(from_fn_with_state(
                self.state.clone(),
                guard_protected_paths::<S>,
            ))
            .with_state(self.state);

        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            router = router.layer(cors);
        }

        Self::with_trace_layer(router)
    }

    /// Run the service as a standalone server
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Session service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
