pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod routes;
pub mod session;
pub mod wizard;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use api::ApiClient;
use auth::{AuthGuard, ExpiryWatcher, Navigator};
use config::ClientConfig;
use routes::Route;
use session::{FileStore, KeyValueStore, SessionContext};
use std::sync::Arc;

/// Everything a front end needs, wired to one session store.
#[derive(Clone, Debug)]
pub struct App {
    pub config: ClientConfig,
    pub session: SessionContext,
    pub client: ApiClient,
    pub guard: AuthGuard,
}

impl App {
    /// Session persisted in the configured session file.
    pub fn new(config: ClientConfig) -> Self {
        let store = Arc::new(FileStore::new(config.session_file.clone()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: ClientConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let session = SessionContext::new(store);
        let client = ApiClient::new(&config, session.clone());
        let guard = AuthGuard::new(session.clone());
        Self {
            config,
            session,
            client,
            guard,
        }
    }

    /// The route actually shown for `path` under the current session.
    pub fn resolve(&self, path: &str) -> Route {
        routes::resolve(path, &self.guard)
    }

    /// Expiry watcher on the configured period; not yet started.
    pub fn expiry_watcher(&self, navigator: Arc<dyn Navigator>) -> ExpiryWatcher {
        ExpiryWatcher::with_period(
            self.session.clone(),
            navigator,
            self.config.expiry_check_interval,
        )
    }
}
