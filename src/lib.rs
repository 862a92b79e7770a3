//! # Gatehouse - Session Layer for Client Applications
//!
//! Facade crate that re-exports the public APIs of the gatehouse components:
//! form validation, the identity provider gateway, the session store with its
//! durable mirror, and the navigator that gates protected views.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `UserProfile`, `Session`, etc.
//! - **Ports**: `AuthGateway`, `ProfileStore`, `SessionPersistence`, `ViewRouter`
//! - **Use cases**: `LoginUseCase`, `RegisterUseCase`, `LogoutUseCase`, `RestoreSessionUseCase`
//! - **Adapters**: `HttpIdentityProvider`, `HttpProfileStore`, `FileSessionPersistence`, etc.
//! - **Service**: `SessionService` - axum router serving the session routes

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types, validation and the session store
pub mod core {
    pub use gatehouse_core::*;
}

pub use gatehouse_core::{
    AuthError, AuthErrorKind, Credential, DisplayName, Email, LoginForm, Password,
    RegistrationForm, Session, SessionStatus, SessionStore, SessionStoreError, Subscription,
    UserProfile, ValidationError, ValidationErrors,
};

// ============================================================================
// Ports
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use gatehouse_core::{
        AuthGateway, PersistenceError, ProfileStore, ProfileWriteError, SessionPersistence,
        ViewRouter,
    };
}

pub use ports::{AuthGateway, ProfileStore, SessionPersistence, ViewRouter};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use gatehouse_application::*;
}

pub use gatehouse_application::{
    LoginUseCase, LogoutUseCase, Navigator, RegisterUseCase, RestoreSessionUseCase, RoutePolicy,
    SessionContext,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Identity provider implementations
    pub mod identity {
        pub use gatehouse_adapters::identity::*;
    }

    /// Profile store and session persistence implementations
    pub mod persistence {
        pub use gatehouse_adapters::persistence::*;
    }

    /// View router implementations
    pub mod navigation {
        pub use gatehouse_adapters::navigation::*;
    }

    /// Configuration
    pub mod config {
        pub use gatehouse_adapters::config::*;
    }
}

pub use gatehouse_adapters::{
    config::GatehouseSettings,
    identity::{HashMapIdentityProvider, HttpIdentityProvider},
    navigation::InMemoryViewRouter,
    persistence::{
        FileSessionPersistence, HashMapProfileStore, HttpProfileStore, InMemorySessionPersistence,
    },
};

// ============================================================================
// HTTP Service (Main Entry Point)
// ============================================================================

/// Axum handlers and middleware
pub mod axum_routes {
    pub use gatehouse_axum::*;
}

pub use gatehouse_axum::{AppState, SessionState};
pub use gatehouse_service::{AllowedOrigins, SessionService};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use axum;
pub use http;
