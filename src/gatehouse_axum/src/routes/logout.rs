use axum::{Json, extract::State};
use gatehouse_application::LogoutUseCase;
use gatehouse_core::ViewRouter;

use crate::{routes::session::SessionBody, state::SessionState};

/// Sign out. Always succeeds; a persistence failure is returned as a warning.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<S>(State(state): State<S>) -> Json<SessionBody>
where
    S: SessionState,
{
    let context = state.context();
    let response = LogoutUseCase::new(context).execute().await;

    let warnings = response
        .persistence
        .map(|e| e.to_string())
        .into_iter()
        .collect();

    Json(
        SessionBody::new(&response.session, context.navigator().router().current_path())
            .with_warnings(warnings),
    )
}
