use secrecy::{ExposeSecret, Secret};

use crate::validation::{PASSWORD_RULE, ValidationError, check};

/// A password that passed [`PASSWORD_RULE`]. Never printed, never persisted.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(raw: Secret<String>) -> Result<Self, ValidationError> {
        check(&PASSWORD_RULE, raw.expose_secret())?;
        Ok(Self(raw))
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = ValidationError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}
