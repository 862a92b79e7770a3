pub mod domain;
pub mod ports;
pub mod session_store;
pub mod validation;

// Re-export commonly used types for convenience
pub use domain::{
    auth_error::{AuthError, AuthErrorKind},
    credential::{Credential, LoginForm, RegistrationForm},
    display_name::DisplayName,
    email::Email,
    password::Password,
    session::{Session, SessionStatus},
    user_profile::UserProfile,
};

pub use ports::{
    repositories::{PersistenceError, ProfileStore, ProfileWriteError, SessionPersistence},
    services::{AuthGateway, ViewRouter},
};

pub use session_store::{SessionStore, SessionStoreError, SubmissionTicket, Subscription};

pub use validation::{
    Field, FieldRule, FormInput, LOGIN_RULES, REGISTRATION_RULES, ValidationError,
    ValidationErrors, ValidationReason,
};
