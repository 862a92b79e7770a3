use serde::Serialize;

use crate::domain::email::Email;

/// The signed-in user as known to the identity provider.
///
/// `id` is the provider's subject id and never changes once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    id: String,
    email: Email,
    display_name: String,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, email: Email, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email,
            display_name: display_name.into(),
        }
    }

    /// Build a profile for a provider that did not return a display name,
    /// falling back to the local part of the email.
    pub fn with_fallback_name(
        id: impl Into<String>,
        email: Email,
        display_name: Option<String>,
    ) -> Self {
        let display_name = display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| email.local_part().to_owned());
        Self::new(id, email, display_name)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
