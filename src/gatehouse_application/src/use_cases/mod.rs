pub mod login;
pub mod logout;
pub mod register;
pub mod restore_session;

pub use login::{LoginError, LoginResponse, LoginUseCase};
pub use logout::{LogoutResponse, LogoutUseCase};
pub use register::{RegisterError, RegisterResponse, RegisterUseCase};
pub use restore_session::RestoreSessionUseCase;
