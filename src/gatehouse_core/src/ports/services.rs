use async_trait::async_trait;

use crate::domain::{auth_error::AuthError, credential::Credential, user_profile::UserProfile};

/// Port trait for the external identity provider.
///
/// Implementations perform exactly one provider call per invocation and never
/// retry; the caller decides whether to resubmit.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Create an account. Fails with `MalformedEmail`, `WeakPassword`,
    /// `EmailAlreadyInUse` or `ProviderUnavailable`.
    async fn register(&self, credential: Credential) -> Result<UserProfile, AuthError>;

    /// Verify credentials. Fails with `InvalidCredentials`, `UserNotFound` or
    /// `ProviderUnavailable`.
    async fn authenticate(&self, credential: Credential) -> Result<UserProfile, AuthError>;
}

/// Port trait for whatever displays views: it knows where the user is and can send them elsewhere.
pub trait ViewRouter: Send + Sync {
    fn current_path(&self) -> String;
    fn redirect(&self, path: &str);
}
