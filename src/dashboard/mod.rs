//! Listing views for both sides of the marketplace.

pub mod filter;
pub mod investor;
pub mod startup;

pub use filter::{unique_options, InvestorFilter, StartupFilter};
pub use investor::InvestorDashboard;
pub use startup::{BulkSendError, StartupDashboard};

use crate::api::{view_failure_reason, ApiClient};
use crate::error::ApiError;
use crate::models::PitchDeck;
use tracing::warn;

pub const NO_STARTUPS_MESSAGE: &str = "No startups found";
pub const NO_INVESTORS_MESSAGE: &str = "No investors found";

/// What a listing shows right now.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    Loading,
    Failed(String),
    /// Nothing to show; carries the empty-state text.
    Empty(&'static str),
    Ready(Vec<T>),
}

impl<T> ListState<T> {
    pub fn items(&self) -> &[T] {
        match self {
            ListState::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ListState::Ready(_))
    }

    fn from_listing(fetched: Option<&Result<(), String>>, items: Vec<T>, empty: &'static str) -> Self {
        match fetched {
            None => ListState::Loading,
            Some(Err(message)) => ListState::Failed(message.clone()),
            Some(Ok(())) if items.is_empty() => ListState::Empty(empty),
            Some(Ok(())) => ListState::Ready(items),
        }
    }
}

/// Alert text for a pitch deck that could not be opened.
pub fn pitch_deck_alert(err: &ApiError) -> String {
    format!("Failed to view pitch deck: {}", view_failure_reason(err))
}

/// Downloads the deck attached to an application.
pub(crate) async fn fetch_pitch_deck(
    client: &ApiClient,
    application_id: i64,
) -> Result<PitchDeck, ApiError> {
    client
        .download_pitch_deck(application_id)
        .await
        .inspect_err(|e| warn!(application_id, "{}", pitch_deck_alert(e)))
}
