use gatehouse_core::SessionPersistence;
use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn should_clear_session_and_persistence() {
    let app = TestApp::new().await;
    app.post_register(&json!({
        "email": "ada@example.com",
        "password": "secret1",
        "displayName": "Ada"
    }))
    .await;

    let response = app.post_logout().await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "idle");
    assert_eq!(body["user"], Value::Null);
    assert_eq!(body["redirect"], "/login");

    assert!(app.persistence.load().await.unwrap().is_none());
}

#[tokio::test]
async fn should_succeed_when_already_signed_out() {
    let app = TestApp::new().await;

    let response = app.post_logout().await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(app.get_session().await["status"], "idle");
}
