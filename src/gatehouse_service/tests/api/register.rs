use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn should_return_201_and_write_profile_document() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&json!({
            "email": "ada@example.com",
            "password": "secret1",
            "displayName": "Ada"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "authenticated");
    assert_eq!(body["redirect"], "/base");
    assert!(body.get("warnings").is_none());

    let id = body["user"]["id"].as_str().unwrap();
    let document = app.profile_store.get(id).await.unwrap();
    assert_eq!(document.email, "ada@example.com");
    assert_eq!(document.user_name, "Ada");
}

#[tokio::test]
async fn should_accept_user_name_field() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&json!({
            "email": "ada@example.com",
            "password": "secret1",
            "userName": "Ada"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
}

#[tokio::test]
async fn should_return_409_if_email_already_exists() {
    let app = TestApp::new().await;
    app.seed_account("ada@example.com", "secret1", "Ada").await;

    let response = app
        .post_register(&json!({
            "email": "ada@example.com",
            "password": "another1",
            "displayName": "Imposter"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 409);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["kind"], "email_already_in_use");
    assert_eq!(app.provider.account_count().await, 1);
}

#[tokio::test]
async fn should_return_422_for_short_display_name() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&json!({
            "email": "ada@example.com",
            "password": "secret1",
            "displayName": " A "
        }))
        .await;

    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "displayName");
    assert_eq!(app.provider.account_count().await, 0);
}

#[tokio::test]
async fn should_return_422_when_password_is_missing() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&json!({"email": "ada@example.com", "displayName": "Ada"}))
        .await;

    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "password");
    assert_eq!(body["errors"][0]["reason"]["code"], "required");
    assert_eq!(app.provider.account_count().await, 0);
}
