use async_trait::async_trait;
use thiserror::Error;

use crate::domain::user_profile::UserProfile;

// ProfileStore port trait and errors
#[derive(Debug, Error)]
pub enum ProfileWriteError {
    #[error("Profile document rejected: {0}")]
    Rejected(String),
    #[error("Profile store unavailable: {0}")]
    Unavailable(String),
}

/// Document store holding user-chosen profile attributes, keyed by user id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn write(&self, profile: &UserProfile) -> Result<(), ProfileWriteError>;
}

// SessionPersistence port trait and errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Persisted session is corrupt: {0}")]
    Corrupt(String),
    #[error("Persistence I/O error: {0}")]
    Io(String),
}

/// Durable local mirror of the signed-in user.
///
/// Only the profile is stored: no credentials, no transient status.
#[async_trait]
pub trait SessionPersistence: Send + Sync {
    async fn save(&self, profile: &UserProfile) -> Result<(), PersistenceError>;
    async fn load(&self) -> Result<Option<UserProfile>, PersistenceError>;
    async fn clear(&self) -> Result<(), PersistenceError>;
}
