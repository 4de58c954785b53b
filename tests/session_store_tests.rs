use fundbridge::auth::{check_expiration, ExpiryCheck, Navigator, SharedNavigator};
use fundbridge::config::ClientConfig;
use fundbridge::error::ApiError;
use fundbridge::models::{Role, Session};
use fundbridge::routes::Route;
use fundbridge::session::{FileStore, KeyValueStore, SessionContext, StoreError};
use fundbridge::test_utils::test_helpers::{fresh_token, token_with_exp};
use fundbridge::App;
use std::sync::Arc;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session(token: String) -> Session {
    Session {
        token,
        user_id: 42,
        role: Role::Startup,
    }
}

#[test]
fn test_file_store_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let first = SessionContext::new(Arc::new(FileStore::new(&path)));
    first.begin(&session(fresh_token())).unwrap();
    assert!(path.exists());

    let second = SessionContext::new(Arc::new(FileStore::new(&path)));
    let restored = second.current().unwrap().unwrap();
    assert_eq!(restored.user_id, 42);
    assert_eq!(restored.role, Role::Startup);

    second.logout().unwrap();
    assert!(first.current().unwrap().is_none());
}

#[test]
fn test_corrupt_session_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(store.get("access_token"), Err(StoreError::Corrupt { .. })));
}

#[test]
fn test_writes_replace_corrupt_session_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{trunc").unwrap();

    let store = FileStore::new(&path);
    store.set("user_id", "9").unwrap();
    assert_eq!(store.get("user_id").unwrap().as_deref(), Some("9"));

    std::fs::write(&path, "{trunc").unwrap();
    store.remove("access_token").unwrap();
    assert_eq!(store.get("access_token").unwrap(), None);
}

async fn login_server() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": fresh_token(),
            "token_type": "bearer",
            "user_id": 5,
            "role": "investor"
        })))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_login_over_corrupt_session_file_persists() {
    let mock_server = login_server().await;
    let dir = TempDir::new().unwrap();
    let session_file = dir.path().join("session.json");
    std::fs::write(&session_file, "{trunc").unwrap();

    let config = ClientConfig::default()
        .with_api_url(&mock_server.uri())
        .with_session_file(&session_file);
    let app = App::new(config.clone());
    app.client.login("a@example.com", "pw").await.unwrap();

    let reopened = App::new(config);
    assert_eq!(reopened.session.user_id().unwrap(), Some(5));
    assert_eq!(reopened.resolve("/investor-dashboard"), Route::InvestorDashboard);
}

#[tokio::test]
async fn test_login_reports_unwritable_session_file() {
    let mock_server = login_server().await;
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let config = ClientConfig::default()
        .with_api_url(&mock_server.uri())
        .with_session_file(blocker.join("session.json"));
    let app = App::new(config);

    let err = app.client.login("a@example.com", "pw").await.unwrap_err();
    assert!(matches!(err, ApiError::Store(StoreError::Io { .. })));
    assert!(err.display_message("Login failed").starts_with("Could not update the saved session"));

    assert!(matches!(app.client.logout(), Err(ApiError::Store(_))));
}

#[test]
fn test_logout_repairs_corrupt_session_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{trunc").unwrap();

    let config = ClientConfig::default().with_session_file(&path);
    let app = App::new(config);
    app.client.logout().unwrap();

    assert!(app.session.current().unwrap().is_none());
    assert_eq!(app.resolve("/login"), Route::Login);
}

#[test]
fn test_app_guards_routes_from_persisted_session() {
    let dir = TempDir::new().unwrap();
    let config = ClientConfig::default().with_session_file(dir.path().join("session.json"));

    let app = App::new(config.clone());
    assert_eq!(app.resolve("/startup-dashboard"), Route::Login);

    app.session.begin(&session(fresh_token())).unwrap();
    let reopened = App::new(config);
    assert_eq!(reopened.resolve("/startup-dashboard"), Route::StartupDashboard);
    assert_eq!(reopened.resolve("/investor-dashboard"), Route::Login);
    assert_eq!(reopened.resolve("/login"), Route::Home);
}

#[test]
fn test_expired_persisted_session_is_cleared() {
    let dir = TempDir::new().unwrap();
    let config = ClientConfig::default().with_session_file(dir.path().join("session.json"));
    let app = App::new(config);
    app.session.begin(&session(token_with_exp(1_000))).unwrap();

    let navigator = SharedNavigator::new("/startup-dashboard");
    let outcome = check_expiration(&app.session, &navigator, 2_000.0);

    assert_eq!(outcome, ExpiryCheck::Expired);
    assert_eq!(navigator.current_path(), "/login");
    assert!(!app.session.is_authenticated().unwrap());
}
