pub mod applications;
pub mod auth;
pub mod client;
pub mod profiles;

pub use applications::view_failure_reason;
pub use client::ApiClient;

use crate::error::ApiError;
use crate::models::{base_name, PitchDeck};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};

async fn read_pitch_deck(response: reqwest::Response) -> Result<PitchDeck, ApiError> {
    let headers = response.headers();
    let filename = headers
        .get(CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .and_then(filename_from_disposition);
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    let bytes = response.bytes().await.map_err(ApiError::Network)?;
    Ok(PitchDeck {
        bytes: bytes.to_vec(),
        filename,
        content_type,
    })
}

/// Pulls the filename out of a `Content-Disposition` header value.
/// Directory parts are dropped.
fn filename_from_disposition(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|param| {
        let (key, raw) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        base_name(raw.trim().trim_matches('"')).map(str::to_string)
    })
}
