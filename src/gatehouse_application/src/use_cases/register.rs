use std::sync::Arc;

use gatehouse_core::{
    AuthError, AuthGateway, ProfileStore, RegistrationForm, Session, SessionPersistence,
    SessionStoreError, ValidationErrors, ViewRouter,
};

use crate::session_context::{SessionContext, SyncReport};

/// Response from register use case
#[derive(Debug)]
pub struct RegisterResponse {
    pub session: Arc<Session>,
    /// Profile document and persistence failures. Neither undoes the sign-in.
    pub report: SyncReport,
}

/// Error types specific to register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Registration failed: {0}")]
    Auth(#[from] AuthError),
    #[error("Session store error: {0}")]
    SessionStore(#[from] SessionStoreError),
}

/// Register use case - creates an account, writes its profile document and signs the user in
pub struct RegisterUseCase<'a, G, S, P, R>
where
    G: AuthGateway,
    S: ProfileStore,
    P: SessionPersistence,
    R: ViewRouter,
{
    gateway: &'a G,
    profile_store: &'a S,
    context: &'a SessionContext<P, R>,
}

impl<'a, G, S, P, R> RegisterUseCase<'a, G, S, P, R>
where
    G: AuthGateway,
    S: ProfileStore,
    P: SessionPersistence,
    R: ViewRouter,
{
    pub fn new(gateway: &'a G, profile_store: &'a S, context: &'a SessionContext<P, R>) -> Self {
        Self {
            gateway,
            profile_store,
            context,
        }
    }

    /// Execute the register use case
    ///
    /// # Arguments
    /// * `form` - Raw display name, email and password as submitted
    ///
    /// # Returns
    /// The authenticated session and a report of any non-fatal sync failures
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, form: RegistrationForm) -> Result<RegisterResponse, RegisterError> {
        let credential = form.validate()?;

        let submission = self.context.begin_submission()?;

        let profile = match self.gateway.register(credential).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::info!(kind = ?e.kind(), "Registration rejected");
                self.context.reject(submission, e.kind()).await?;
                return Err(e.into());
            }
        };

        tracing::info!(user_id = %profile.id(), "Account created");

        // The profile document is written exactly once, before the session is set
        let profile_write = self
            .profile_store
            .write(&profile)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    user_id = %profile.id(),
                    error = %e,
                    "Profile document write failed, profile will be missing downstream"
                );
            })
            .err();

        let (session, persistence) = self.context.commit(submission, profile).await?;

        Ok(RegisterResponse {
            session,
            report: SyncReport {
                profile_write,
                persistence,
            },
        })
    }
}
