use super::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    Account, AuthToken, LoginRequest, OtpRequest, OtpResponse, Role, Session, SignupRequest,
};
use reqwest::Method;
use tracing::warn;

impl ApiClient {
    /// Asks the server to e-mail a one-time password.
    pub async fn send_otp(&self, email: &str) -> Result<OtpResponse, ApiError> {
        let request = self
            .public(Method::POST, "/auth/send-otp")
            .json(&OtpRequest {
                email: email.to_string(),
            });
        self.send_json(request).await
    }

    /// Verifies the OTP, creates the account, and stores the new session.
    pub async fn verify_otp_and_signup(
        &self,
        email: &str,
        otp: &str,
        password: &str,
        role: Role,
    ) -> Result<Session, ApiError> {
        let request = self
            .public(Method::POST, "/auth/verify-otp-and-signup")
            .json(&SignupRequest {
                email: email.to_string(),
                otp: otp.to_string(),
                password: password.to_string(),
                role,
            });
        let token: AuthToken = self.send_json(request).await?;
        self.store_session(token)
    }

    /// Password login; stores the session on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let request = self.public(Method::POST, "/auth/login").json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        });
        let token: AuthToken = self.send_json(request).await?;
        self.store_session(token)
    }

    pub async fn me(&self) -> Result<Account, ApiError> {
        let request = self.authed(Method::GET, "/auth/me")?;
        self.send_json(request).await
    }

    /// Local logout; the server keeps no session state to revoke.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session().logout().map_err(|e| {
            warn!("failed to clear session: {}", e);
            ApiError::Store(e)
        })
    }

    fn store_session(&self, token: AuthToken) -> Result<Session, ApiError> {
        let session = Session::from(token);
        self.session().begin(&session).map_err(|e| {
            warn!("failed to persist session: {}", e);
            ApiError::Store(e)
        })?;
        Ok(session)
    }
}
