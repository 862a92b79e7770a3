use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use gatehouse_application::RouteDecision;

use crate::state::SessionState;

/// Only lets signed-in users through. Everyone else gets a `303 See Other`
/// to the public entry view and the wrapped handler never runs.
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn require_session<S>(State(state): State<S>, request: Request, next: Next) -> Response
where
    S: SessionState,
{
    let session = state.context().session();
    if session.is_authenticated() {
        return next.run(request).await;
    }

    let entry = &state.context().navigator().policy().public_entry;
    tracing::info!(path = %request.uri().path(), to = %entry, "Rejected unauthenticated request");
    Redirect::to(entry).into_response()
}

/// Gates every path the route policy marks as protected.
pub async fn guard_protected_paths<S>(
    State(state): State<S>,
    request: Request,
    next: Next,
) -> Response
where
    S: SessionState,
{
    let session = state.context().session();
    let navigator = state.context().navigator();

    match navigator.guard(request.uri().path(), &session) {
        RouteDecision::Render => next.run(request).await,
        RouteDecision::Redirect(to) => {
            tracing::info!(path = %request.uri().path(), to = %to, "Redirecting protected path");
            Redirect::to(&to).into_response()
        }
    }
}
