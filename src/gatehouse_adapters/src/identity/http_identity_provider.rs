use gatehouse_core::{AuthError, AuthGateway, Credential, Email, UserProfile};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::config::API_KEY_HEADER;

/// Identity provider reached over its REST API.
///
/// One request per call, no retries. Provider error codes are classified here
/// and never returned raw.
pub struct HttpIdentityProvider {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl HttpIdentityProvider {
    pub fn new(base_url: String, api_key: Secret<String>, http_client: Client) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
        }
    }

    /// Resolve `path` below `base_url`, which is treated as a directory.
    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        let mut base = Url::parse(&self.base_url).map_err(unavailable)?;
        if !base.path().ends_with('/') {
            let directory = format!("{}/", base.path());
            base.set_path(&directory);
        }
        base.join(path).map_err(unavailable)
    }

    async fn submit(
        &self,
        operation: Operation,
        credential: &Credential,
    ) -> Result<ProviderUser, AuthError> {
        let url = self.endpoint(operation.path())?;

        let request_body = CredentialRequest {
            email: credential.email().as_str(),
            password: credential.password().as_ref().expose_secret(),
        };

        let response = self
            .http_client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if status.is_success() {
            return response.json::<ProviderUser>().await.map_err(unavailable);
        }

        if status.is_client_error() {
            return match response.json::<ProviderErrorBody>().await {
                Ok(body) => {
                    let error = operation.classify(&body.code);
                    tracing::debug!(code = %body.code, kind = ?error.kind(), "Provider rejected request");
                    Err(error)
                }
                Err(e) => Err(unavailable(format!("{status}: unreadable error body ({e})"))),
            };
        }

        Err(unavailable(status))
    }

    /// Store the display name on the provider's own user record.
    async fn update_display_name(&self, uid: &str, display_name: &str) -> Result<(), String> {
        let url = self
            .endpoint(UPDATE_PROFILE_PATH)
            .map_err(|e| e.to_string())?;

        let request_body = UpdateProfileRequest { uid, display_name };

        self.http_client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl AuthGateway for HttpIdentityProvider {
    #[tracing::instrument(name = "Registering with identity provider", skip_all)]
    async fn register(&self, credential: Credential) -> Result<UserProfile, AuthError> {
        let user = self.submit(Operation::Register, &credential).await?;
        let email = user.email()?;

        let Some(display_name) = credential.display_name() else {
            return Ok(UserProfile::with_fallback_name(user.uid, email, user.display_name));
        };

        if let Err(e) = self
            .update_display_name(&user.uid, display_name.as_str())
            .await
        {
            tracing::warn!(user_id = %user.uid, error = %e, "Failed to set display name on provider");
        }

        Ok(UserProfile::new(user.uid, email, display_name.as_str()))
    }

    #[tracing::instrument(name = "Authenticating with identity provider", skip_all)]
    async fn authenticate(&self, credential: Credential) -> Result<UserProfile, AuthError> {
        let user = self.submit(Operation::Authenticate, &credential).await?;
        let email = user.email()?;

        Ok(UserProfile::with_fallback_name(user.uid, email, user.display_name))
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Register,
    Authenticate,
}

impl Operation {
    fn path(&self) -> &'static str {
        match self {
            Operation::Register => REGISTER_PATH,
            Operation::Authenticate => AUTHENTICATE_PATH,
        }
    }

    /// Map a provider error code onto the failures this operation may report.
    fn classify(&self, code: &str) -> AuthError {
        match (self, code) {
            (Operation::Register, "auth/invalid-email") => AuthError::MalformedEmail,
            (Operation::Register, "auth/weak-password") => AuthError::WeakPassword,
            (Operation::Register, "auth/email-already-in-use") => AuthError::EmailAlreadyInUse,
            (
                Operation::Authenticate,
                "auth/wrong-password" | "auth/invalid-credential" | "auth/invalid-email",
            ) => AuthError::InvalidCredentials,
            (Operation::Authenticate, "auth/user-not-found") => AuthError::UserNotFound,
            (_, other) => AuthError::ProviderUnavailable(format!("unexpected code {other}")),
        }
    }
}

fn unavailable(e: impl ToString) -> AuthError {
    AuthError::ProviderUnavailable(e.to_string())
}

const REGISTER_PATH: &str = "register";
const AUTHENTICATE_PATH: &str = "authenticate";
const UPDATE_PROFILE_PATH: &str = "update-profile";

#[derive(Serialize, Debug)]
struct CredentialRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest<'a> {
    uid: &'a str,
    display_name: &'a str,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ProviderUser {
    uid: String,
    email: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl ProviderUser {
    fn email(&self) -> Result<Email, AuthError> {
        Email::parse(&self.email)
            .map_err(|e| unavailable(format!("provider returned unusable email: {e}")))
    }
}

#[derive(Deserialize, Debug)]
struct ProviderErrorBody {
    code: String,
}
