use gatehouse_core::SessionPersistence;
use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn should_return_200_and_redirect_to_landing_on_valid_credentials() {
    let app = TestApp::new().await;
    app.seed_account("x@y.com", "secret1", "Xavier").await;

    let response = app
        .post_login(&json!({"email": "x@y.com", "password": "secret1"}))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "authenticated");
    assert_eq!(body["user"]["email"], "x@y.com");
    assert_eq!(body["user"]["displayName"], "Xavier");
    assert_eq!(body["redirect"], "/base");

    let persisted = app.persistence.load().await.unwrap().unwrap();
    assert_eq!(persisted.email().as_str(), "x@y.com");
    assert_eq!(app.view_router.redirects().last().unwrap(), "/base");
}

#[tokio::test]
async fn should_return_422_with_field_errors_on_invalid_input() {
    let app = TestApp::new().await;

    let response = app
        .post_login(&json!({"email": "not-an-email", "password": "123"}))
        .await;
    assert_eq!(response.status().as_u16(), 422);

    let body: Value = response.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], "email");
    assert_eq!(errors[0]["reason"]["code"], "malformed");
    assert_eq!(errors[1]["field"], "password");
    assert_eq!(errors[1]["reason"]["code"], "too_short");

    assert_eq!(app.get_session().await["status"], "idle");
}

#[tokio::test]
async fn should_return_422_when_password_is_missing() {
    let app = TestApp::new().await;

    let response = app.post_login(&json!({"email": "a@b.com"})).await;
    assert_eq!(response.status().as_u16(), 422);

    let body: Value = response.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "password");
    assert_eq!(errors[0]["reason"]["code"], "required");

    assert_eq!(app.get_session().await["status"], "idle");
}

#[tokio::test]
async fn should_map_auth_failures_to_status_codes() {
    let app = TestApp::new().await;
    app.seed_account("x@y.com", "secret1", "Xavier").await;

    let test_cases = [
        (json!({"email": "x@y.com", "password": "wrong-pass"}), 401, "invalid_credentials"),
        (json!({"email": "nobody@y.com", "password": "secret1"}), 404, "user_not_found"),
    ];

    for (body, status, kind) in test_cases {
        let response = app.post_login(&body).await;
        assert_eq!(response.status().as_u16(), status, "Failed for input: {body:?}");

        let error: Value = response.json().await.unwrap();
        assert_eq!(error["kind"], kind);
        assert!(error["error"].as_str().is_some());

        let session = app.get_session().await;
        assert_eq!(session["status"], "failed");
        assert_eq!(session["user"], Value::Null);
    }
}

#[tokio::test]
async fn should_return_503_when_provider_is_down() {
    let app = TestApp::new().await;
    app.provider.set_available(false);

    let response = app
        .post_login(&json!({"email": "x@y.com", "password": "secret1"}))
        .await;

    assert_eq!(response.status().as_u16(), 503);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["kind"], "provider_unavailable");
}
