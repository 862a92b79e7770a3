use serde::Serialize;
use thiserror::Error;

/// Classified identity provider failure.
///
/// Raw provider codes never leave the gateway adapters; they are mapped to one
/// of these variants first.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Malformed email")]
    MalformedEmail,
    #[error("Weak password")]
    WeakPassword,
    #[error("Email already in use")]
    EmailAlreadyInUse,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User not found")]
    UserNotFound,
    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),
}

impl AuthError {
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::MalformedEmail => AuthErrorKind::MalformedEmail,
            AuthError::WeakPassword => AuthErrorKind::WeakPassword,
            AuthError::EmailAlreadyInUse => AuthErrorKind::EmailAlreadyInUse,
            AuthError::InvalidCredentials => AuthErrorKind::InvalidCredentials,
            AuthError::UserNotFound => AuthErrorKind::UserNotFound,
            AuthError::ProviderUnavailable(_) => AuthErrorKind::ProviderUnavailable,
        }
    }
}

/// Tag recorded in a failed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthErrorKind {
    MalformedEmail,
    WeakPassword,
    EmailAlreadyInUse,
    InvalidCredentials,
    UserNotFound,
    ProviderUnavailable,
}

impl AuthErrorKind {
    /// Single message suitable for showing next to the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthErrorKind::MalformedEmail => "Please enter a valid email address.",
            AuthErrorKind::WeakPassword => "Password is too weak.",
            AuthErrorKind::EmailAlreadyInUse => "An account already exists for this email.",
            AuthErrorKind::InvalidCredentials => "Incorrect email or password.",
            AuthErrorKind::UserNotFound => "No account found for this email.",
            AuthErrorKind::ProviderUnavailable => {
                "The sign-in service is unavailable. Please try again."
            }
        }
    }
}
