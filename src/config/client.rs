use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::auth::expiry::DEFAULT_CHECK_INTERVAL;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Runtime settings for talking to the marketplace API.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub session_file: PathBuf,
    pub expiry_check_interval: Duration,
    /// `None` means requests never time out client-side.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: default_session_file(),
            expiry_check_interval: DEFAULT_CHECK_INTERVAL,
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Reads `FUNDBRIDGE_*` variables, falling back to defaults for anything
    /// unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = env::var("FUNDBRIDGE_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| normalize_base_url(&value))
            .unwrap_or(defaults.api_url);

        let session_file = env::var("FUNDBRIDGE_SESSION_FILE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        let expiry_check_interval = env_secs("FUNDBRIDGE_EXPIRY_CHECK_SECS")
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.expiry_check_interval);

        let request_timeout = env_secs("FUNDBRIDGE_REQUEST_TIMEOUT_SECS")
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        ClientConfig {
            api_url,
            session_file,
            expiry_check_interval,
            request_timeout,
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = normalize_base_url(api_url);
        self
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }
}

/// Return the standard configuration directory depending on the platform
pub fn config_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join("fundbridge")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".fundbridge")
    }
}

fn default_session_file() -> PathBuf {
    config_dir().join("session.json")
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn env_secs(key: &str) -> Option<u64> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(secs) => Some(secs),
        Err(_) => {
            warn!("{} is not a whole number of seconds: {:?}", key, raw);
            None
        }
    }
}
