//! Mapping of use case failures onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gatehouse_application::{LoginError, RegisterError};
use gatehouse_core::{
    AuthError, AuthErrorKind, SessionStoreError, ValidationErrors, ValidationReason,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),
    #[error("Authentication failed: {0}")]
    Auth(AuthError),
    #[error("{0}")]
    Submission(SessionStoreError),
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::Validation(e) => ApiError::Validation(e),
            LoginError::Auth(e) => ApiError::Auth(e),
            LoginError::SessionStore(e) => ApiError::Submission(e),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::Validation(e) => ApiError::Validation(e),
            RegisterError::Auth(e) => ApiError::Auth(e),
            RegisterError::SessionStore(e) => ApiError::Submission(e),
        }
    }
}

#[derive(Serialize)]
struct FieldErrorBody {
    field: &'static str,
    reason: ValidationReason,
    message: String,
}

fn auth_status(kind: AuthErrorKind) -> StatusCode {
    match kind {
        AuthErrorKind::MalformedEmail | AuthErrorKind::WeakPassword => StatusCode::BAD_REQUEST,
        AuthErrorKind::EmailAlreadyInUse => StatusCode::CONFLICT,
        AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthErrorKind::UserNotFound => StatusCode::NOT_FOUND,
        AuthErrorKind::ProviderUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                let errors: Vec<FieldErrorBody> = errors
                    .iter()
                    .map(|e| FieldErrorBody {
                        field: e.field.as_str(),
                        reason: e.reason,
                        message: e.to_string(),
                    })
                    .collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(serde_json::json!({ "errors": errors })),
                )
                    .into_response()
            }
            ApiError::Auth(error) => {
                let kind = error.kind();
                (
                    auth_status(kind),
                    Json(serde_json::json!({ "error": kind.user_message(), "kind": kind })),
                )
                    .into_response()
            }
            ApiError::Submission(error) => (
                StatusCode::CONFLICT,
                Json(serde_json::json!({ "error": error.to_string() })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::LoginForm;

    #[test]
    fn test_auth_error_statuses() {
        let cases = [
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::UserNotFound, StatusCode::NOT_FOUND),
            (AuthError::EmailAlreadyInUse, StatusCode::CONFLICT),
            (AuthError::WeakPassword, StatusCode::BAD_REQUEST),
            (
                AuthError::ProviderUnavailable("timeout".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::Auth(error).into_response().status(), status);
        }
    }

    #[test]
    fn test_validation_is_unprocessable() {
        let errors = LoginForm::new("nope", "1").validate().unwrap_err();
        let response = ApiError::from(LoginError::Validation(errors)).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_in_flight_is_conflict() {
        let response = ApiError::from(RegisterError::SessionStore(
            SessionStoreError::SubmissionInFlight,
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
