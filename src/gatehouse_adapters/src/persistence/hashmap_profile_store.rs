use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use gatehouse_core::{ProfileStore, ProfileWriteError, UserProfile};

use crate::persistence::ProfileDocument;

#[derive(Default, Clone)]
pub struct HashMapProfileStore {
    documents: Arc<RwLock<HashMap<String, ProfileDocument>>>,
}

impl HashMapProfileStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(&self, id: &str) -> Option<ProfileDocument> {
        self.documents.read().await.get(id).cloned()
    }
}

#[async_trait::async_trait]
impl ProfileStore for HashMapProfileStore {
    async fn write(&self, profile: &UserProfile) -> Result<(), ProfileWriteError> {
        let mut documents = self.documents.write().await;
        documents.insert(profile.id().to_owned(), ProfileDocument::from(profile));
        Ok(())
    }
}
