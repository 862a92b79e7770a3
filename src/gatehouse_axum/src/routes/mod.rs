//! Axum route handlers for the session use cases.

pub mod login;
pub mod logout;
pub mod register;
pub mod session;

pub use login::login;
pub use logout::logout;
pub use register::register;
pub use session::{SessionBody, session};
