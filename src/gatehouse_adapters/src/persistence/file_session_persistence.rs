use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use gatehouse_core::{Email, PersistenceError, SessionPersistence, UserProfile};
use serde::{Deserialize, Serialize};

/// On-disk shape of the signed-in user. Credentials are never written.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    id: String,
    email: String,
    display_name: String,
}

impl From<&UserProfile> for PersistedSession {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id().to_owned(),
            email: profile.email().as_str().to_owned(),
            display_name: profile.display_name().to_owned(),
        }
    }
}

impl TryFrom<PersistedSession> for UserProfile {
    type Error = PersistenceError;

    fn try_from(record: PersistedSession) -> Result<Self, Self::Error> {
        if record.id.trim().is_empty() {
            return Err(PersistenceError::Corrupt("missing id".to_string()));
        }
        let email =
            Email::parse(&record.email).map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
        Ok(UserProfile::new(record.id, email, record.display_name))
    }
}

/// Session mirror kept in a single JSON file.
///
/// Writes go to a sibling `.tmp` file which is then renamed over the target.
#[derive(Debug, Clone)]
pub struct FileSessionPersistence {
    path: PathBuf,
}

impl FileSessionPersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn io_error(e: std::io::Error) -> PersistenceError {
    PersistenceError::Io(e.to_string())
}

#[async_trait::async_trait]
impl SessionPersistence for FileSessionPersistence {
    #[tracing::instrument(name = "Saving session", skip_all, fields(path = %self.path.display()))]
    async fn save(&self, profile: &UserProfile) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec_pretty(&PersistedSession::from(profile))
            .map_err(|e| PersistenceError::Io(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, bytes).await.map_err(io_error)?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(io_error)
    }

    #[tracing::instrument(name = "Loading session", skip_all, fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Option<UserProfile>, PersistenceError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(e)),
        };

        let record: PersistedSession = serde_json::from_slice(&bytes)
            .map_err(|e| PersistenceError::Corrupt(e.to_string()))?;

        UserProfile::try_from(record).map(Some)
    }

    #[tracing::instrument(name = "Clearing session", skip_all, fields(path = %self.path.display()))]
    async fn clear(&self) -> Result<(), PersistenceError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }
}
