use super::store::{KeyValueStore, StoreResult};
use crate::models::{Role, Session};
use std::sync::Arc;
use tracing::{debug, info};

pub const TOKEN_KEY: &str = "access_token";
pub const USER_ID_KEY: &str = "user_id";
pub const ROLE_KEY: &str = "user_role";

/// Typed view over the token store.
///
/// Cloning is cheap; clones share the same backing store.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn token(&self) -> StoreResult<Option<String>> {
        self.store.get(TOKEN_KEY)
    }

    pub fn set_token(&self, token: &str) -> StoreResult<()> {
        self.store.set(TOKEN_KEY, token)
    }

    pub fn remove_token(&self) -> StoreResult<()> {
        self.store.remove(TOKEN_KEY)
    }

    /// Stored user id; a value that does not parse as an integer reads as absent.
    pub fn user_id(&self) -> StoreResult<Option<i64>> {
        Ok(self
            .store
            .get(USER_ID_KEY)?
            .and_then(|raw| raw.trim().parse::<i64>().ok()))
    }

    pub fn set_user_id(&self, user_id: i64) -> StoreResult<()> {
        self.store.set(USER_ID_KEY, &user_id.to_string())
    }

    pub fn remove_user_id(&self) -> StoreResult<()> {
        self.store.remove(USER_ID_KEY)
    }

    /// Raw role string exactly as stored.
    pub fn role_raw(&self) -> StoreResult<Option<String>> {
        self.store.get(ROLE_KEY)
    }

    /// Stored role; unknown strings read as absent.
    pub fn role(&self) -> StoreResult<Option<Role>> {
        Ok(self.role_raw()?.and_then(|raw| raw.parse::<Role>().ok()))
    }

    pub fn set_role(&self, role: Role) -> StoreResult<()> {
        self.store.set(ROLE_KEY, role.as_str())
    }

    pub fn remove_role(&self) -> StoreResult<()> {
        self.store.remove(ROLE_KEY)
    }

    pub fn is_authenticated(&self) -> StoreResult<bool> {
        Ok(self.token()?.is_some())
    }

    /// Persists a freshly issued session.
    pub fn begin(&self, session: &Session) -> StoreResult<()> {
        self.set_token(&session.token)?;
        self.set_user_id(session.user_id)?;
        self.set_role(session.role)?;
        info!(user_id = session.user_id, role = %session.role, "session started");
        Ok(())
    }

    /// Complete session, if token, user id and role are all present and valid.
    pub fn current(&self) -> StoreResult<Option<Session>> {
        let (Some(token), Some(user_id), Some(role)) = (self.token()?, self.user_id()?, self.role()?)
        else {
            return Ok(None);
        };
        Ok(Some(Session {
            token,
            user_id,
            role,
        }))
    }

    pub fn logout(&self) -> StoreResult<()> {
        self.remove_token()?;
        self.remove_user_id()?;
        self.remove_role()?;
        debug!("session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}
