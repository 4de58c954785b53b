use fundbridge::config::ClientConfig;
use fundbridge::error::ApiError;
use fundbridge::models::Role;
use fundbridge::routes::Route;
use fundbridge::test_utils::test_helpers;
use fundbridge::App;
use serde_json::json;
use std::sync::Arc;
use fundbridge::session::MemoryStore;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(server: &MockServer) -> App {
    let config = ClientConfig::default().with_api_url(&server.uri());
    App::with_store(config, Arc::new(MemoryStore::new()))
}

#[tokio::test]
async fn test_signup_stores_session_and_lands_on_profile_creation() {
    let mock_server = MockServer::start().await;
    let token = test_helpers::fresh_token();

    Mock::given(method("POST"))
        .and(path("/auth/verify-otp-and-signup"))
        .and(body_json(json!({
            "email": "founder@example.com",
            "otp": "123456",
            "password": "hunter22",
            "role": "startup"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "bearer",
            "user_id": 42,
            "role": "startup"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = app_for(&mock_server);
    let session = app
        .client
        .verify_otp_and_signup("founder@example.com", "123456", "hunter22", Role::Startup)
        .await
        .unwrap();

    assert_eq!(session.user_id, 42);
    assert_eq!(app.session.token().unwrap().as_deref(), Some(token.as_str()));
    assert_eq!(app.session.user_id().unwrap(), Some(42));
    assert_eq!(app.session.role().unwrap(), Some(Role::Startup));

    let landing = Route::profile_create_for(session.role);
    assert_eq!(landing.path(), "/startup-profile-create");
    assert_eq!(app.resolve(landing.path()), landing);
    assert_eq!(app.resolve("/signup"), Route::Home);
}

#[tokio::test]
async fn test_send_otp_passes_warning_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/send-otp"))
        .and(body_json(json!({ "email": "a@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "OTP sent",
            "email": "a@example.com",
            "warning": "Email delivery is disabled; OTP printed to server log"
        })))
        .mount(&mock_server)
        .await;

    let app = app_for(&mock_server);
    let sent = app.client.send_otp("a@example.com").await.unwrap();
    assert_eq!(sent.message, "OTP sent");
    assert!(sent.warning.is_some());
}

#[tokio::test]
async fn test_validation_errors_are_joined() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/verify-otp-and-signup"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                { "loc": ["body", "email"], "msg": "value is not a valid email address" },
                { "loc": ["body", "otp"], "msg": "field required" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let app = app_for(&mock_server);
    let err = app
        .client
        .verify_otp_and_signup("nope", "", "pw", Role::Investor)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert_eq!(
        err.display_message("Signup failed"),
        "value is not a valid email address, field required"
    );
    assert!(!app.session.is_authenticated().unwrap());
}

#[tokio::test]
async fn test_login_rejection_keeps_string_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid email or password" })),
        )
        .mount(&mock_server)
        .await;

    let app = app_for(&mock_server);
    let err = app.client.login("a@example.com", "bad").await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 401, .. }));
    assert_eq!(err.display_message("Login failed"), "Invalid email or password");
}

#[tokio::test]
async fn test_authenticated_calls_send_bearer_token() {
    let mock_server = MockServer::start().await;
    let session = test_helpers::signed_in(Role::Investor, 7);
    let token = session.token().unwrap().unwrap();

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("Authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "email": "vc@example.com",
            "role": "investor",
            "created_at": "2024-01-01T00:00:00"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_helpers::client_for(&mock_server.uri(), session);
    let account = client.me().await.unwrap();
    assert_eq!(account.email, "vc@example.com");
}

#[tokio::test]
async fn test_missing_token_fails_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_helpers::client_for(&mock_server.uri(), test_helpers::memory_session());
    let err = client.list_startups().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthenticated));
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let session = test_helpers::signed_in(Role::Startup, 1);
    let client = test_helpers::client_for("http://127.0.0.1:1", session);

    let err = client.list_investors().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(
        err.display_message("Failed to fetch investors"),
        "Network error. Please try again."
    );
}

#[tokio::test]
async fn test_logout_clears_every_key() {
    let session = test_helpers::signed_in(Role::Startup, 3);
    let client = test_helpers::client_for("http://127.0.0.1:1", session.clone());

    client.logout().unwrap();

    assert!(session.token().unwrap().is_none());
    assert!(session.user_id().unwrap().is_none());
    assert!(session.role().unwrap().is_none());
}
