use std::collections::HashMap;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::RwLock;

use gatehouse_core::{AuthError, AuthGateway, Credential, Email, Password, UserProfile};

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    password: Password,
    display_name: Option<String>,
}

/// Identity provider held in memory. Used by tests and local runs.
#[derive(Clone)]
pub struct HashMapIdentityProvider {
    accounts: Arc<RwLock<HashMap<Email, Account>>>,
    available: Arc<AtomicBool>,
}

impl Default for HashMapIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HashMapIdentityProvider {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulate an outage: while unavailable every call fails with
    /// [`AuthError::ProviderUnavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    fn ensure_available(&self) -> Result<(), AuthError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AuthError::ProviderUnavailable(
                "in-memory provider switched off".to_string(),
            ))
        }
    }
}

#[async_trait::async_trait]
impl AuthGateway for HashMapIdentityProvider {
    async fn register(&self, credential: Credential) -> Result<UserProfile, AuthError> {
        self.ensure_available()?;

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(credential.email()) {
            return Err(AuthError::EmailAlreadyInUse);
        }

        let account = Account {
            uid: uuid::Uuid::new_v4().to_string(),
            password: credential.password().clone(),
            display_name: credential
                .display_name()
                .map(|name| name.as_str().to_owned()),
        };
        let profile = UserProfile::with_fallback_name(
            account.uid.clone(),
            credential.email().clone(),
            account.display_name.clone(),
        );
        accounts.insert(credential.email().clone(), account);

        Ok(profile)
    }

    async fn authenticate(&self, credential: Credential) -> Result<UserProfile, AuthError> {
        self.ensure_available()?;

        let accounts = self.accounts.read().await;
        let account = accounts
            .get(credential.email())
            .ok_or(AuthError::UserNotFound)?;

        if account.password != *credential.password() {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(UserProfile::with_fallback_name(
            account.uid.clone(),
            credential.email().clone(),
            account.display_name.clone(),
        ))
    }
}
