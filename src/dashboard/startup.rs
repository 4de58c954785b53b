use super::filter::InvestorFilter;
use super::{fetch_pitch_deck, ListState, NO_INVESTORS_MESSAGE};
use crate::api::ApiClient;
use crate::error::{ApiError, NETWORK_ERROR_MESSAGE};
use crate::models::{
    ApplicationLog, Attachment, InterestLevel, InterestStatus, InvestorProfile, PitchDeck, Role,
};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch investors";
pub const LOGS_FAILED_MESSAGE: &str = "Unable to fetch sent pitch decks";
pub const PARTIAL_SEND_MESSAGE: &str = "Failed to send some pitch decks";

/// At least one send in a bulk pitch deck send failed.
#[derive(Debug)]
pub struct BulkSendError {
    pub sent: Vec<ApplicationLog>,
    pub failures: Vec<(i64, ApiError)>,
    /// Tasks that ended without reporting back.
    pub aborted: usize,
}

impl BulkSendError {
    pub fn message(&self) -> &'static str {
        let all_network = !self.failures.is_empty()
            && self.aborted == 0
            && self
                .failures
                .iter()
                .all(|(_, e)| matches!(e, ApiError::Network(_)));
        if all_network {
            NETWORK_ERROR_MESSAGE
        } else {
            PARTIAL_SEND_MESSAGE
        }
    }
}

impl fmt::Display for BulkSendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for BulkSendError {}

/// Startup-side view: investors to pitch, decks sent, interest received.
#[derive(Debug)]
pub struct StartupDashboard {
    client: ApiClient,
    startup_id: i64,
    investors: Vec<InvestorProfile>,
    listing: Option<Result<(), String>>,
    sent: Vec<ApplicationLog>,
    logs_error: Option<String>,
    interests: Vec<InterestStatus>,
    selected: BTreeSet<i64>,
    pub filter: InvestorFilter,
}

impl StartupDashboard {
    pub fn new(client: ApiClient, startup_id: i64) -> Self {
        Self {
            client,
            startup_id,
            investors: Vec::new(),
            listing: None,
            sent: Vec::new(),
            logs_error: None,
            interests: Vec::new(),
            selected: BTreeSet::new(),
            filter: InvestorFilter::default(),
        }
    }

    pub async fn load(&mut self) {
        self.listing = None;
        let (investors, sent, interests) = tokio::join!(
            self.client.list_investors(),
            self.client.pitch_deck_logs(Role::Startup, self.startup_id),
            self.client.interest_statuses(Role::Startup, self.startup_id),
        );

        match investors {
            Ok(investors) => {
                debug!(count = investors.len(), "Fetched investors");
                self.investors = investors;
                self.listing = Some(Ok(()));
            }
            Err(e) => {
                warn!("Failed to fetch investors: {}", e);
                self.investors.clear();
                self.listing = Some(Err(e.display_message(FETCH_FAILED_MESSAGE)));
            }
        }

        match sent {
            Ok(logs) => {
                self.sent = logs;
                self.logs_error = None;
            }
            Err(e) => {
                warn!("Failed to fetch sent pitch decks: {}", e);
                self.sent.clear();
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

    /// Investor accounts that already received this startup's deck.
    pub fn hidden(&self) -> HashSet<i64> {
        self.sent.iter().map(|log| log.investor_id).collect()
    }

    pub fn state(&self) -> ListState<&InvestorProfile> {
        let items = self.filter.apply(&self.investors, &self.hidden());
        ListState::from_listing(self.listing.as_ref(), items, NO_INVESTORS_MESSAGE)
    }

    pub fn investors(&self) -> &[InvestorProfile] {
        &self.investors
    }

    pub fn stage_options(&self) -> Vec<String> {
        InvestorFilter::stage_options(&self.investors)
    }

    pub fn industry_options(&self) -> Vec<String> {
        InvestorFilter::industry_options(&self.investors)
    }

    pub fn check_size_options(&self) -> Vec<String> {
        InvestorFilter::check_size_options(&self.investors)
    }

    pub fn sent_pitch_decks(&self) -> Result<&[ApplicationLog], &str> {
        match &self.logs_error {
            Some(message) => Err(message.as_str()),
            None => Ok(&self.sent),
        }
    }

    /// Latest interest signal from the investor account `investor_id`.
    pub fn interest_from(&self, investor_id: i64) -> Option<InterestLevel> {
        self.interests
            .iter()
            .find(|status| status.investor_id == investor_id)
            .map(|status| status.status)
    }

    pub fn interested_investors(&self) -> impl Iterator<Item = &InterestStatus> {
        self.interests
            .iter()
            .filter(|status| status.status == InterestLevel::Interested)
    }

    /// Flips selection of one investor account; returns whether it is now selected.
    pub fn toggle_selection(&mut self, investor_id: i64) -> bool {
        if self.selected.remove(&investor_id) {
            false
        } else {
            self.selected.insert(investor_id);
            true
        }
    }

    pub fn selected(&self) -> &BTreeSet<i64> {
        &self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Sends the current pitch deck to every selected investor at once.
    ///
    /// Succeeds only if every send succeeds; then the selection is cleared
    /// and the dashboard refetched. On failure the selection is kept.
    pub async fn send_pitch_decks(&mut self) -> Result<Vec<ApplicationLog>, BulkSendError> {
        if self.selected.is_empty() {
            return Ok(Vec::new());
        }

        let mut tasks = JoinSet::new();
        for &investor_id in &self.selected {
            let client = self.client.clone();
            tasks.spawn(async move { (investor_id, client.send_pitch_deck(investor_id).await) });
        }

        let mut sent = Vec::new();
        let mut failures = Vec::new();
        let mut aborted = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(log))) => sent.push(log),
                Ok((investor_id, Err(e))) => {
                    warn!(investor_id, "Pitch deck send failed: {}", e);
                    failures.push((investor_id, e));
                }
                Err(e) => {
                    error!("Pitch deck send task failed: {}", e);
                    aborted += 1;
                }
            }
        }

        if !failures.is_empty() || aborted > 0 {
            return Err(BulkSendError {
                sent,
                failures,
                aborted,
            });
        }

        info!(count = sent.len(), "Pitch decks sent");
        self.selected.clear();
        self.load().await;
        Ok(sent)
    }

    /// Swaps the deck attached to this startup's profile.
    pub async fn replace_pitch_deck(&self, deck: &Attachment) -> Result<Value, ApiError> {
        let response = self
            .client
            .replace_pitch_deck(deck)
            .await
            .inspect_err(|e| warn!("Pitch deck replacement failed: {}", e))?;
        info!(filename = %deck.filename, size = deck.size(), "Pitch deck replaced");
        Ok(response)
    }

    pub async fn view_pitch_deck(&self, application_id: i64) -> Result<PitchDeck, ApiError> {
        fetch_pitch_deck(&self.client, application_id).await
    }

    /// The deck currently attached to this startup's own profile.
    pub async fn current_pitch_deck(&self) -> Result<PitchDeck, ApiError> {
        self.client.download_profile_pitch_deck(self.startup_id).await
    }
}
