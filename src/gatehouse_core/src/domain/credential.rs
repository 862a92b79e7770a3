use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::{
    domain::{display_name::DisplayName, email::Email, password::Password},
    validation::{Field, FormInput, LOGIN_RULES, REGISTRATION_RULES, ValidationErrors, validate},
};

/// Validated sign-in material handed to the identity provider.
///
/// Transient: it is moved into the gateway call and dropped afterwards.
#[derive(Debug, Clone)]
pub struct Credential {
    email: Email,
    password: Password,
    display_name: Option<DisplayName>,
}

impl Credential {
    pub fn new(email: Email, password: Password) -> Self {
        Self {
            email,
            password,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: DisplayName) -> Self {
        self.display_name = Some(display_name);
        self
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }
}

// A missing password is reported by the rule table, not by the deserializer
fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

/// Raw input from the sign-in form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default = "empty_secret")]
    pub password: Secret<String>,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Secret::new(password.into()),
        }
    }

    /// Run the login rule table and build a [`Credential`].
    pub fn validate(self) -> Result<Credential, ValidationErrors> {
        validate(&self, LOGIN_RULES)?;

        let email = Email::parse(&self.email)?;
        let password = Password::parse(self.password)?;

        Ok(Credential::new(email, password))
    }
}

impl FormInput for LoginForm {
    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Email => Some(&self.email),
            Field::Password => Some(self.password.expose_secret()),
            Field::DisplayName => None,
        }
    }
}

/// Raw input from the sign-up form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(default)]
    pub email: String,
    #[serde(default = "empty_secret")]
    pub password: Secret<String>,
    #[serde(default, alias = "userName")]
    pub display_name: String,
}

impl RegistrationForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: Secret::new(password.into()),
            display_name: display_name.into(),
        }
    }

    /// Run the registration rule table and build a [`Credential`] carrying the display name.
    pub fn validate(self) -> Result<Credential, ValidationErrors> {
        validate(&self, REGISTRATION_RULES)?;

        let display_name = DisplayName::parse(&self.display_name)?;
        let email = Email::parse(&self.email)?;
        let password = Password::parse(self.password)?;

        Ok(Credential::new(email, password).with_display_name(display_name))
    }
}

impl FormInput for RegistrationForm {
    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Email => Some(&self.email),
            Field::Password => Some(self.password.expose_secret()),
            Field::DisplayName => Some(&self.display_name),
        }
    }
}
