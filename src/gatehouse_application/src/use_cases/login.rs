use std::sync::Arc;

use gatehouse_core::{
    AuthError, AuthGateway, LoginForm, Session, SessionPersistence, SessionStoreError,
    ValidationErrors, ViewRouter,
};

use crate::session_context::{SessionContext, SyncReport};

/// Response from login use case
#[derive(Debug)]
pub struct LoginResponse {
    pub session: Arc<Session>,
    pub report: SyncReport,
}

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error("Session store error: {0}")]
    SessionStore(#[from] SessionStoreError),
}

/// Login use case - signs an existing user in
pub struct LoginUseCase<'a, G, P, R>
where
    G: AuthGateway,
    P: SessionPersistence,
    R: ViewRouter,
{
    gateway: &'a G,
    context: &'a SessionContext<P, R>,
}

impl<'a, G, P, R> LoginUseCase<'a, G, P, R>
where
    G: AuthGateway,
    P: SessionPersistence,
    R: ViewRouter,
{
    pub fn new(gateway: &'a G, context: &'a SessionContext<P, R>) -> Self {
        Self { gateway, context }
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `form` - Raw email and password as submitted
    ///
    /// # Returns
    /// The authenticated session, plus any persistence failure recorded on the way
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, form: LoginForm) -> Result<LoginResponse, LoginError> {
        // Nothing reaches the provider unless the form is valid
        let credential = form.validate()?;

        let submission = self.context.begin_submission()?;

        match self.gateway.authenticate(credential).await {
            Ok(profile) => {
                tracing::info!(user_id = %profile.id(), "User authenticated");
                let (session, persistence) = self.context.commit(submission, profile).await?;
                Ok(LoginResponse {
                    session,
                    report: SyncReport {
                        profile_write: None,
                        persistence,
                    },
                })
            }
            Err(e) => {
                tracing::info!(kind = ?e.kind(), "Authentication rejected");
                self.context.reject(submission, e.kind()).await?;
                Err(e.into())
            }
        }
    }
}
