use axum::{Json, extract::State, response::IntoResponse};
use gatehouse_application::{LoginUseCase, SyncReport};
use gatehouse_core::{LoginForm, ViewRouter};

use crate::{error::ApiError, routes::session::SessionBody, state::SessionState};

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<S>(
    State(state): State<S>,
    Json(form): Json<LoginForm>,
) -> Result<impl IntoResponse, ApiError>
where
    S: SessionState,
{
    let context = state.context();
    let response = LoginUseCase::new(state.gateway(), context)
        .execute(form)
        .await?;

    let body = SessionBody::new(&response.session, context.navigator().router().current_path())
        .with_warnings(warnings(response.report));

    Ok(Json(body))
}

pub(crate) fn warnings(report: SyncReport) -> Vec<String> {
    let profile_write = report.profile_write.map(|e| e.to_string());
    let persistence = report.persistence.map(|e| e.to_string());
    profile_write.into_iter().chain(persistence).collect()
}
