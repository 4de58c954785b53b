use super::filter::StartupFilter;
use super::{fetch_pitch_deck, ListState, NO_STARTUPS_MESSAGE};
use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{ApplicationLog, InterestLevel, InterestStatus, PitchDeck, Role, StartupProfile};
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch startups";
pub const LOGS_FAILED_MESSAGE: &str = "Unable to fetch received pitch decks";
pub const INTEREST_FAILED_MESSAGE: &str = "Failed to update interest status";

/// Investor-side view: every startup, decks received, interest signals.
#[derive(Debug)]
pub struct InvestorDashboard {
    client: ApiClient,
    investor_id: i64,
    startups: Vec<StartupProfile>,
    listing: Option<Result<(), String>>,
    received: Vec<ApplicationLog>,
    logs_error: Option<String>,
    interests: Vec<InterestStatus>,
    pub filter: StartupFilter,
}

impl InvestorDashboard {
    pub fn new(client: ApiClient, investor_id: i64) -> Self {
        Self {
            client,
            investor_id,
            startups: Vec::new(),
            listing: None,
            received: Vec::new(),
            logs_error: None,
            interests: Vec::new(),
            filter: StartupFilter::default(),
        }
    }

    /// Fetches startups, received decks and interest statuses together.
    ///
    /// Each failure is kept on its own panel; a failed interest fetch
    /// only means nothing is hidden.
    pub async fn load(&mut self) {
        self.listing = None;
        let (startups, received, interests) = tokio::join!(
            self.client.list_startups(),
            self.client.pitch_deck_logs(Role::Investor, self.investor_id),
            self.client.interest_statuses(Role::Investor, self.investor_id),
        );

        match startups {
            Ok(startups) => {
                debug!(count = startups.len(), "Fetched startups");
                self.startups = startups;
                self.listing = Some(Ok(()));
            }
            Err(e) => {
                warn!("Failed to fetch startups: {}", e);
                self.startups.clear();
                self.listing = Some(Err(e.display_message(FETCH_FAILED_MESSAGE)));
            }
        }

        match received {
            Ok(logs) => {
                self.received = logs;
                self.logs_error = None;
            }
            Err(e) => {
                warn!("Failed to fetch received pitch decks: {}", e);
                self.received.clear();
                self.logs_error = Some(LOGS_FAILED_MESSAGE.to_string());
            }
        }

        match interests {
            Ok(statuses) => self.interests = statuses,
            Err(e) => {
                warn!("Failed to fetch interest statuses: {}", e);
                self.interests.clear();
            }
        }
    }

    /// Startup accounts this investor has already signalled about.
    pub fn hidden(&self) -> HashSet<i64> {
        self.interests
            .iter()
            .filter(|status| status.investor_id == self.investor_id)
            .map(|status| status.startup_id)
            .collect()
    }

    /// The filtered listing.
    pub fn state(&self) -> ListState<&StartupProfile> {
        let items = self.filter.apply(&self.startups, &self.hidden());
        ListState::from_listing(self.listing.as_ref(), items, NO_STARTUPS_MESSAGE)
    }

    pub fn startups(&self) -> &[StartupProfile] {
        &self.startups
    }

    pub fn find_startup(&self, user_id: i64) -> Option<&StartupProfile> {
        self.startups.iter().find(|s| s.user_id == user_id)
    }

    pub fn industry_options(&self) -> Vec<String> {
        StartupFilter::industry_options(&self.startups)
    }

    pub fn funding_stage_options(&self) -> Vec<String> {
        StartupFilter::funding_stage_options(&self.startups)
    }

    pub fn received_pitch_decks(&self) -> Result<&[ApplicationLog], &str> {
        match &self.logs_error {
            Some(message) => Err(message.as_str()),
            None => Ok(&self.received),
        }
    }

    pub fn interests(&self) -> &[InterestStatus] {
        &self.interests
    }

    pub fn interested(&self) -> impl Iterator<Item = &InterestStatus> {
        self.interests
            .iter()
            .filter(|status| status.status == InterestLevel::Interested)
    }

    /// Records interest in the startup owned by `startup_user_id`, then
    /// refetches so the startup drops out of the listing.
    pub async fn express_interest(
        &mut self,
        startup_user_id: i64,
        level: InterestLevel,
    ) -> Result<InterestStatus, ApiError> {
        let status = self
            .client
            .update_interest(startup_user_id, level)
            .await
            .inspect_err(|e| warn!(startup_user_id, "{}: {}", INTEREST_FAILED_MESSAGE, e))?;

        info!(startup_user_id, status = level.as_str(), "Interest recorded");
        self.load().await;
        Ok(status)
    }

    pub async fn view_pitch_deck(&self, application_id: i64) -> Result<PitchDeck, ApiError> {
        fetch_pitch_deck(&self.client, application_id).await
    }
}
