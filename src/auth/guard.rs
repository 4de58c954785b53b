use super::token::{is_expired_at, now_seconds};
use crate::models::Role;
use crate::session::SessionContext;
use tracing::{debug, warn};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// What a protected view is allowed to see once admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub token: String,
    pub user_id: Option<i64>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Granted(Grant),
    Redirect(&'static str),
}

impl Admission {
    pub fn is_granted(&self) -> bool {
        matches!(self, Admission::Granted(_))
    }
}

/// Route admission based on the stored session.
///
/// This is a UX gate only. Real authorization happens server-side.
#[derive(Clone, Debug)]
pub struct AuthGuard {
    session: SessionContext,
}

impl AuthGuard {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn require_auth(&self, required_role: Option<Role>) -> Admission {
        self.require_auth_at(required_role, now_seconds())
    }

    /// Same as [`AuthGuard::require_auth`] with an explicit clock.
    pub fn require_auth_at(&self, required_role: Option<Role>, now: f64) -> Admission {
        let token = match self.session.token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("no token stored, redirecting to login");
                return Admission::Redirect(LOGIN_PATH);
            }
            Err(e) => {
                warn!("failed to read session token: {}", e);
                return Admission::Redirect(LOGIN_PATH);
            }
        };

        if is_expired_at(Some(&token), now) {
            debug!("token expired or unreadable, redirecting to login");
            return Admission::Redirect(LOGIN_PATH);
        }

        let role = match self.session.role() {
            Ok(role) => role,
            Err(e) => {
                warn!("failed to read session role: {}", e);
                return Admission::Redirect(LOGIN_PATH);
            }
        };

        if let Some(required) = required_role {
            if role != Some(required) {
                debug!(required = %required, "role mismatch, redirecting to login");
                return Admission::Redirect(LOGIN_PATH);
            }
        }

        let user_id = self.session.user_id().unwrap_or_else(|e| {
            warn!("failed to read session user id: {}", e);
            None
        });

        Admission::Granted(Grant {
            token,
            user_id,
            role,
        })
    }

    /// Login and signup pages send an already signed-in user home.
    ///
    /// Only token presence counts here, matching how those pages decide.
    pub fn redirect_if_authenticated(&self) -> Option<&'static str> {
        match self.session.is_authenticated() {
            Ok(true) => Some(HOME_PATH),
            Ok(false) => None,
            Err(e) => {
                warn!("failed to read session token: {}", e);
                None
            }
        }
    }
}
