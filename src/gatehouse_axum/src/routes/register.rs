use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gatehouse_application::RegisterUseCase;
use gatehouse_core::{RegistrationForm, ViewRouter};

use crate::{
    error::ApiError,
    routes::{login::warnings, session::SessionBody},
    state::SessionState,
};

/// Create an account and sign it in. Profile document and persistence failures
/// come back as `warnings`; the account exists either way.
#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S>(
    State(state): State<S>,
    Json(form): Json<RegistrationForm>,
) -> Result<impl IntoResponse, ApiError>
where
    S: SessionState,
{
    let context = state.context();
    let response = RegisterUseCase::new(state.gateway(), state.profile_store(), context)
        .execute(form)
        .await?;

    let body = SessionBody::new(&response.session, context.navigator().router().current_path())
        .with_warnings(warnings(response.report));

    Ok((StatusCode::CREATED, Json(body)))
}
