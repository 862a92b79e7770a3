use std::sync::Arc;

use axum::{Router, routing::get};
use gatehouse_adapters::{
    identity::HashMapIdentityProvider,
    navigation::InMemoryViewRouter,
    persistence::{HashMapProfileStore, InMemorySessionPersistence},
};
use gatehouse_application::{Navigator, RoutePolicy, SessionContext};
use gatehouse_axum::AppState;
use gatehouse_core::SessionStore;
use gatehouse_service::SessionService;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub type TestState = AppState<
    HashMapIdentityProvider,
    HashMapProfileStore,
    InMemorySessionPersistence,
    InMemoryViewRouter,
>;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub provider: HashMapIdentityProvider,
    pub profile_store: HashMapProfileStore,
    pub persistence: InMemorySessionPersistence,
    pub view_router: InMemoryViewRouter,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_persistence(InMemorySessionPersistence::new()).await
    }

    /// Boot with `persistence` as left by a previous run.
    pub async fn with_persistence(persistence: InMemorySessionPersistence) -> Self {
        let provider = HashMapIdentityProvider::new();
        let profile_store = HashMapProfileStore::new();
        let view_router = InMemoryViewRouter::new("/login");

        let context = Arc::new(SessionContext::new(
            Arc::new(SessionStore::new()),
            persistence.clone(),
            Navigator::new(RoutePolicy::default(), view_router.clone()),
        ));
        context.restore().await;

        let state: TestState = AppState::new(provider.clone(), profile_store.clone(), context);

        let protected = Router::new().route("/quizzes", get(|| async { "quiz list" }));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind ephemeral port");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let service = SessionService::new(state).with_protected_routes(protected);
        tokio::spawn(async move {
            service
                .run_standalone(listener, None)
                .await
                .expect("Session service crashed");
        });

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            address,
            http_client,
            provider,
            profile_store,
            persistence,
            view_router,
        }
    }

    pub async fn post_login(&self, body: &Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}/login", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_register(&self, body: &Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}/register", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_logout(&self) -> reqwest::Response {
        self.http_client
            .post(format!("{}/logout", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_session(&self) -> Value {
        self.get(&format!("{}/session", &self.address))
            .await
            .json()
            .await
            .expect("Failed to parse session body")
    }

    pub async fn get_path(&self, path: &str) -> reqwest::Response {
        self.get(&format!("{}{}", &self.address, path)).await
    }

    async fn get(&self, url: &str) -> reqwest::Response {
        self.http_client
            .get(url)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register `email` and sign out again, leaving a known account behind.
    pub async fn seed_account(&self, email: &str, password: &str, display_name: &str) {
        let response = self
            .post_register(&json!({
                "email": email,
                "password": password,
                "displayName": display_name
            }))
            .await;
        assert_eq!(response.status().as_u16(), 201);
        self.post_logout().await;
    }
}
