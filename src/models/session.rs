use super::role::Role;
use serde::{Deserialize, Serialize};

/// Logged-in identity kept in the token store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub role: Role,
}

/// Body returned by the signup and login endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user_id: i64,
    pub role: Role,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<AuthToken> for Session {
    fn from(token: AuthToken) -> Self {
        Session {
            token: token.access_token,
            user_id: token.user_id,
            role: token.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpResponse {
    pub message: String,
    pub email: String,
    #[serde(default)]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub otp: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account as reported by `/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub created_at: Option<String>,
}
