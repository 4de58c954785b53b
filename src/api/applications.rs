use super::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    ApplicationLog, InterestLevel, InterestStatus, InterestUpdate, PitchDeck, Role,
    SendPitchDeckRequest,
};
use reqwest::Method;

impl ApiClient {
    /// Sends the caller's current pitch deck to one investor.
    pub async fn send_pitch_deck(&self, investor_id: i64) -> Result<ApplicationLog, ApiError> {
        let request = self
            .authed(Method::POST, "/applications/send-pitch-deck")?
            .json(&SendPitchDeckRequest { investor_id });
        self.send_json(request).await
    }

    /// Pitch decks sent by a startup or received by an investor.
    pub async fn pitch_deck_logs(
        &self,
        role: Role,
        user_id: i64,
    ) -> Result<Vec<ApplicationLog>, ApiError> {
        let direction = match role {
            Role::Startup => "sent",
            Role::Investor => "received",
        };
        let path = format!("/applications/{}/{}/{}-pitch-decks", role, user_id, direction);
        let request = self.authed(Method::GET, &path)?;
        self.send_json(request).await
    }

    /// Records (or overwrites) the caller's interest in a startup account.
    pub async fn update_interest(
        &self,
        startup_id: i64,
        status: InterestLevel,
    ) -> Result<InterestStatus, ApiError> {
        let request = self
            .authed(Method::POST, "/applications/update-interest")?
            .json(&InterestUpdate { startup_id, status });
        self.send_json(request).await
    }

    /// Interest statuses expressed by an investor, or toward a startup.
    pub async fn interest_statuses(
        &self,
        role: Role,
        user_id: i64,
    ) -> Result<Vec<InterestStatus>, ApiError> {
        let path = format!("/applications/interest-status/{}/{}", role, user_id);
        let request = self.authed(Method::GET, &path)?;
        self.send_json(request).await
    }

    /// Fetches the deck attached to an application as a blob.
    pub async fn download_pitch_deck(&self, application_id: i64) -> Result<PitchDeck, ApiError> {
        let request = self.authed(
            Method::GET,
            &format!("/applications/download-pitch-deck/{}", application_id),
        )?;
        let response = self.send_raw(request).await?;
        super::read_pitch_deck(response).await
    }
}

/// Reason string for a failed pitch deck view.
pub fn view_failure_reason(err: &ApiError) -> String {
    match err {
        ApiError::Status { status, body } => format!("View failed: {} - {}", status, body),
        ApiError::Validation { status, message } | ApiError::Rejected { status, message } => {
            format!("View failed: {} - {}", status, message)
        }
        other => other.to_string(),
    }
}
