use std::sync::Arc;

use color_eyre::eyre::Result;
use gatehouse::{
    AllowedOrigins, AppState, FileSessionPersistence, GatehouseSettings, HashMapProfileStore,
    HttpIdentityProvider, HttpProfileStore, InMemoryViewRouter, Navigator, RestoreSessionUseCase,
    SessionContext, SessionService, SessionState, SessionStore, adapters::config::ServerSettings,
};
use reqwest::Client as HttpClient;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let config = GatehouseSettings::load()?;

    let http_client = HttpClient::builder()
        .timeout(config.identity.timeout())
        .build()?;

    let identity_provider = HttpIdentityProvider::new(
        config.identity.base_url.clone(),
        config.identity.api_key.clone(),
        http_client.clone(),
    );

    let view_router = InMemoryViewRouter::new(config.routes.public_entry.clone());
    let context = Arc::new(SessionContext::new(
        Arc::new(SessionStore::new()),
        FileSessionPersistence::new(&config.persistence.path),
        Navigator::new(config.routes.clone(), view_router),
    ));

    let session = RestoreSessionUseCase::new(&context).execute().await;
    tracing::info!(status = ?session.status(), "Session restored");

    match config.profile_store.base_url.clone() {
        Some(base_url) => {
            let profile_store = HttpProfileStore::new(
                base_url,
                config.profile_store.collection.clone(),
                config.identity.api_key.clone(),
                http_client,
            );
            serve(
                AppState::new(identity_provider, profile_store, context),
                &config.server,
            )
            .await
        }
        None => {
            tracing::warn!("No profile store configured, keeping profile documents in memory");
            serve(
                AppState::new(identity_provider, HashMapProfileStore::new(), context),
                &config.server,
            )
            .await
        }
    }
}

async fn serve<S>(state: S, server: &ServerSettings) -> Result<()>
where
    S: SessionState,
{
    let mut service = SessionService::new(state);
    if let Some(assets_dir) = &server.assets_dir {
        service = service.with_assets(assets_dir);
    }

    let allowed_origins = AllowedOrigins::parse(&server.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&server.address).await?;
    tracing::info!("Starting gatehouse session service...");

    service
        .run_standalone(listener, Some(allowed_origins))
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
