pub mod auth_error;
pub mod credential;
pub mod display_name;
pub mod email;
pub mod password;
pub mod session;
pub mod user_profile;
