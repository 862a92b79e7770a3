use std::{collections::HashMap, path::PathBuf, time::Duration};

use config::{Config, ConfigError, Environment, File};
use gatehouse_application::RoutePolicy;
use secrecy::Secret;
use serde::Deserialize;

use crate::config::{DEFAULT_CONFIG_FILE, env, prod};

#[derive(Debug, Deserialize)]
pub struct IdentitySettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    pub timeout_in_millis: u64,
}

impl IdentitySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

/// Without a `base_url` profile documents are kept in memory.
#[derive(Debug, Deserialize)]
pub struct ProfileStoreSettings {
    pub base_url: Option<String>,
    pub collection: String,
}

#[derive(Debug, Deserialize)]
pub struct PersistenceSettings {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub address: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// Static files served for every path without a route.
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct GatehouseSettings {
    pub identity: IdentitySettings,
    pub profile_store: ProfileStoreSettings,
    pub persistence: PersistenceSettings,
    pub routes: RoutePolicy,
    pub server: ServerSettings,
}

impl GatehouseSettings {
    /// Read `.env`, the optional config file and `GATEHOUSE__*` overrides.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let file = std::env::var(env::CONFIG_FILE_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        Self::from_sources(&file, None)
    }

    /// Build settings from `file` (optional, any supported extension) and the
    /// environment. `env_overrides` replaces the process environment when given.
    pub fn from_sources(
        file: &str,
        env_overrides: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let default_routes = RoutePolicy::default();

        let environment = Environment::with_prefix(env::ENV_PREFIX)
            .separator(env::ENV_SEPARATOR)
            .list_separator(",")
            .with_list_parse_key("routes.protected_paths")
            .with_list_parse_key("server.allowed_origins")
            .try_parsing(true)
            .source(env_overrides);

        Config::builder()
            .set_default(
                "identity.timeout_in_millis",
                prod::identity::TIMEOUT.as_millis() as u64,
            )?
            .set_default("profile_store.collection", prod::PROFILE_COLLECTION)?
            .set_default("persistence.path", prod::SESSION_FILE)?
            .set_default("routes.public_entry", default_routes.public_entry)?
            .set_default("routes.protected_landing", default_routes.protected_landing)?
            .set_default("routes.protected_paths", default_routes.protected_paths)?
            .set_default("server.address", prod::APP_ADDRESS)?
            .add_source(File::with_name(file).required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}
