pub mod navigator;
pub mod session_context;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use navigator::{Navigator, RouteDecision, RoutePolicy};
pub use session_context::{SessionContext, Submission, SyncReport};
pub use use_cases::{
    LoginError, LoginResponse, LoginUseCase, LogoutResponse, LogoutUseCase, RegisterError,
    RegisterResponse, RegisterUseCase, RestoreSessionUseCase,
};
