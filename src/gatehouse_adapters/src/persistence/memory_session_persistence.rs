use std::sync::Arc;
use tokio::sync::RwLock;

use gatehouse_core::{PersistenceError, SessionPersistence, UserProfile};

#[derive(Default, Clone)]
pub struct InMemorySessionPersistence {
    record: Arc<RwLock<Option<UserProfile>>>,
}

impl InMemorySessionPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously saved user.
    pub fn holding(profile: UserProfile) -> Self {
        Self {
            record: Arc::new(RwLock::new(Some(profile))),
        }
    }
}

#[async_trait::async_trait]
impl SessionPersistence for InMemorySessionPersistence {
    async fn save(&self, profile: &UserProfile) -> Result<(), PersistenceError> {
        *self.record.write().await = Some(profile.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<UserProfile>, PersistenceError> {
        Ok(self.record.read().await.clone())
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        *self.record.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::Email;

    #[tokio::test]
    async fn test_clear_then_load_is_none() {
        let persistence = InMemorySessionPersistence::holding(UserProfile::new(
            "uid-1",
            Email::parse("x@y.com").unwrap(),
            "Xavier",
        ));
        assert!(persistence.load().await.unwrap().is_some());

        persistence.clear().await.unwrap();
        assert_eq!(persistence.load().await.unwrap(), None);
    }
}
