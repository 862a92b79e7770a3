//! Axum integration for the gatehouse session layer.
//!
//! Route handlers are generic over [`SessionState`], so any combination of
//! gateway, profile store, persistence and view router can be served.
//!
//! # Usage
//!
//! ```ignore
//! use gatehouse_axum::{AppState, routes};
//!
//! let app = Router::new()
//!     .route("/login", post(routes::login::<State>))
//!     .route("/logout", post(routes::logout::<State>))
//!     .with_state(state);
//! ```

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{guard_protected_paths, require_session};
pub use state::{AppState, SessionState};
