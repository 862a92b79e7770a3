use gatehouse_adapters::persistence::InMemorySessionPersistence;
use gatehouse_core::{Email, UserProfile};
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn should_redirect_anonymous_requests_to_public_entry() {
    let app = TestApp::new().await;

    for path in ["/quizzes", "/base", "/addQuiz?subject=Biologia"] {
        let response = app.get_path(path).await;
        assert_eq!(response.status().as_u16(), 303, "Failed for path: {path}");
        assert_eq!(response.headers()["location"], "/login");
    }
}

#[tokio::test]
async fn should_render_protected_route_when_signed_in() {
    let app = TestApp::new().await;
    app.seed_account("x@y.com", "secret1", "Xavier").await;
    app.post_login(&json!({"email": "x@y.com", "password": "secret1"}))
        .await;

    let response = app.get_path("/quizzes").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "quiz list");
}

#[tokio::test]
async fn should_restore_persisted_session_on_startup() {
    let persistence = InMemorySessionPersistence::holding(UserProfile::new(
        "uid-7",
        Email::parse("ada@example.com").unwrap(),
        "Ada",
    ));
    let app = TestApp::with_persistence(persistence).await;

    let session = app.get_session().await;
    assert_eq!(session["status"], "authenticated");
    assert_eq!(session["user"]["id"], "uid-7");
    assert_eq!(session["redirect"], "/base");

    let response = app.get_path("/quizzes").await;
    assert_eq!(response.status().as_u16(), 200);
}
