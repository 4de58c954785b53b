//! Periodic session expiry check.
//!
//! The watcher runs as a spawned task owned by a [`CancellationToken`], so
//! its lifetime is tied to whoever started it instead of the process.

use super::guard::LOGIN_PATH;
use super::token::{is_expired_at, now_seconds};
use crate::session::SessionContext;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Paths where an expired session is left alone.
const AUTH_PATHS: [&str; 2] = ["/login", "/signup"];

/// Where the user currently is, and how to send them elsewhere.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

/// In-process navigator that records every navigation.
#[derive(Debug)]
pub struct SharedNavigator {
    current: RwLock<String>,
    history: RwLock<Vec<String>>,
}

impl SharedNavigator {
    pub fn new(initial: &str) -> Self {
        Self {
            current: RwLock::new(initial.to_string()),
            history: RwLock::new(Vec::new()),
        }
    }

    /// Paths navigated to, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history
            .read()
            .map(|history| history.clone())
            .unwrap_or_default()
    }
}

impl Navigator for SharedNavigator {
    fn current_path(&self) -> String {
        self.current
            .read()
            .map(|path| path.clone())
            .unwrap_or_default()
    }

    fn navigate(&self, path: &str) {
        if let Ok(mut current) = self.current.write() {
            *current = path.to_string();
        }
        if let Ok(mut history) = self.history.write() {
            history.push(path.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryCheck {
    /// On an auth page; nothing was checked.
    Skipped,
    Valid,
    /// Session cleared and user sent to the login page.
    Expired,
}

/// One expiry check. An absent token counts as expired.
pub fn check_expiration(session: &SessionContext, navigator: &dyn Navigator, now: f64) -> ExpiryCheck {
    let path = navigator.current_path();
    if AUTH_PATHS.contains(&path.as_str()) {
        return ExpiryCheck::Skipped;
    }

    let token = session.token().unwrap_or_else(|e| {
        warn!("failed to read session token: {}", e);
        None
    });

    if !is_expired_at(token.as_deref(), now) {
        return ExpiryCheck::Valid;
    }

    if let Err(e) = session.logout() {
        warn!("failed to clear expired session: {}", e);
    }
    info!(from = %path, "session expired, redirecting to login");
    navigator.navigate(LOGIN_PATH);
    ExpiryCheck::Expired
}

/// Background task re-running [`check_expiration`] at a fixed period.
pub struct ExpiryWatcher {
    session: SessionContext,
    navigator: Arc<dyn Navigator>,
    period: Duration,
    running: Option<(CancellationToken, JoinHandle<()>)>,
}

impl ExpiryWatcher {
    pub fn new(session: SessionContext, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_period(session, navigator, DEFAULT_CHECK_INTERVAL)
    }

    pub fn with_period(
        session: SessionContext,
        navigator: Arc<dyn Navigator>,
        period: Duration,
    ) -> Self {
        Self {
            session,
            navigator,
            period,
            running: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|(_, handle)| !handle.is_finished())
    }

    /// Runs a single check immediately.
    pub fn check_now(&self) -> ExpiryCheck {
        check_expiration(&self.session, self.navigator.as_ref(), now_seconds())
    }

    /// Spawns the periodic task. The first check fires one period from now.
    /// Calling `start` on a running watcher does nothing.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let ct = CancellationToken::new();
        let session = self.session.clone();
        let navigator = Arc::clone(&self.navigator);
        let period = self.period;
        let child = ct.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = ticker.tick() => {
                        check_expiration(&session, navigator.as_ref(), now_seconds());
                    }
                }
            }
            debug!("expiry watcher stopped");
        });

        debug!(period_secs = period.as_secs_f64(), "expiry watcher started");
        self.running = Some((ct, handle));
    }

    /// Signals the task to stop. Returns once the signal is sent.
    pub fn stop(&mut self) {
        if let Some((ct, _handle)) = self.running.take() {
            ct.cancel();
        }
    }

    /// Stops the task and waits for it to exit.
    pub async fn shutdown(mut self) {
        if let Some((ct, handle)) = self.running.take() {
            ct.cancel();
            if let Err(e) = handle.await {
                warn!("expiry watcher task failed: {}", e);
            }
        }
    }
}

impl Drop for ExpiryWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
