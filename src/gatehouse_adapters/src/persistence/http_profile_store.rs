use gatehouse_core::{ProfileStore, ProfileWriteError, UserProfile};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use crate::{config::API_KEY_HEADER, persistence::ProfileDocument};

/// Document store reached over REST. Each profile lives at
/// `{base_url}/{collection}/{id}` and is replaced wholesale on write.
pub struct HttpProfileStore {
    http_client: Client,
    base_url: String,
    collection: String,
    api_key: Secret<String>,
}

impl HttpProfileStore {
    pub fn new(
        base_url: String,
        collection: String,
        api_key: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            collection,
            api_key,
        }
    }

    fn document_url(&self, id: &str) -> Result<Url, ProfileWriteError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProfileWriteError::Unavailable(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ProfileWriteError::Unavailable("base url cannot hold a path".into()))?
            .pop_if_empty()
            .push(&self.collection)
            .push(id);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl ProfileStore for HttpProfileStore {
    #[tracing::instrument(name = "Writing profile document", skip_all, fields(user_id = %profile.id()))]
    async fn write(&self, profile: &UserProfile) -> Result<(), ProfileWriteError> {
        let url = self.document_url(profile.id())?;

        let response = self
            .http_client
            .put(url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&ProfileDocument::from(profile))
            .send()
            .await
            .map_err(|e| ProfileWriteError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status.is_client_error() {
            Err(ProfileWriteError::Rejected(status.to_string()))
        } else {
            Err(ProfileWriteError::Unavailable(status.to_string()))
        }
    }
}
