use super::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Attachment, InvestorProfile, PitchDeck, StartupProfile};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;

fn file_part(attachment: &Attachment) -> Result<Part, ApiError> {
    Part::bytes(attachment.bytes.clone())
        .file_name(attachment.filename.clone())
        .mime_str(&attachment.content_type)
        .map_err(ApiError::Network)
}

impl ApiClient {
    pub async fn list_startups(&self) -> Result<Vec<StartupProfile>, ApiError> {
        let request = self.authed(Method::GET, "/startup-profile/all")?;
        self.send_json(request).await
    }

    pub async fn startup_profile_for_user(&self, user_id: i64) -> Result<StartupProfile, ApiError> {
        let request = self.authed(Method::GET, &format!("/startup-profile/user/{}", user_id))?;
        self.send_json(request).await
    }

    /// Submits a complete startup profile in one multipart request:
    /// `profile_data` carries the JSON document, `pitch_deck` the optional file.
    pub async fn create_startup_profile(
        &self,
        profile_data: &Value,
        pitch_deck: Option<&Attachment>,
    ) -> Result<StartupProfile, ApiError> {
        let mut form = Form::new().text("profile_data", profile_data.to_string());
        if let Some(deck) = pitch_deck {
            form = form.part("pitch_deck", file_part(deck)?);
        }

        let request = self
            .authed(Method::POST, "/startup-profile/create-with-files")?
            .multipart(form);
        self.send_json(request).await
    }

    pub async fn update_startup_profile(
        &self,
        user_id: i64,
        changes: &Value,
    ) -> Result<StartupProfile, ApiError> {
        let request = self
            .authed(Method::PUT, &format!("/startup-profile/{}", user_id))?
            .json(changes);
        self.send_json(request).await
    }

    /// Replaces the caller's current pitch deck.
    pub async fn replace_pitch_deck(&self, deck: &Attachment) -> Result<Value, ApiError> {
        let form = Form::new().part("pitch_deck", file_part(deck)?);
        let request = self
            .authed(Method::PUT, "/startup-profile/update-pitch-deck")?
            .multipart(form);
        self.send_json(request).await
    }

    /// Downloads the pitch deck currently attached to a startup profile.
    pub async fn download_profile_pitch_deck(&self, user_id: i64) -> Result<PitchDeck, ApiError> {
        let request = self.authed(
            Method::GET,
            &format!("/startup-profile/download-pitch-deck/{}", user_id),
        )?;
        let response = self.send_raw(request).await?;
        super::read_pitch_deck(response).await
    }

    pub async fn list_investors(&self) -> Result<Vec<InvestorProfile>, ApiError> {
        let request = self.authed(Method::GET, "/investor-profile/all")?;
        self.send_json(request).await
    }

    pub async fn investor_profile_for_user(
        &self,
        user_id: i64,
    ) -> Result<InvestorProfile, ApiError> {
        let request = self.authed(Method::GET, &format!("/investor-profile/user/{}", user_id))?;
        self.send_json(request).await
    }

    pub async fn create_investor_profile(
        &self,
        profile: &Value,
    ) -> Result<InvestorProfile, ApiError> {
        let request = self.authed(Method::POST, "/investor-profile/")?.json(profile);
        self.send_json(request).await
    }

    pub async fn update_investor_profile(
        &self,
        user_id: i64,
        changes: &Value,
    ) -> Result<InvestorProfile, ApiError> {
        let request = self
            .authed(Method::PUT, &format!("/investor-profile/{}", user_id))?
            .json(changes);
        self.send_json(request).await
    }
}
