pub mod session_service;
pub mod tracing;

pub use session_service::{AllowedOrigins, SessionService};
