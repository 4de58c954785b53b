use serde_json::Value;
use thiserror::Error;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Message shown for any transport failure.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session storage error: {0}")]
    Store(#[from] crate::session::StoreError),

    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Failures surfaced by calls against the marketplace API.
///
/// Every variant is terminal for the action that triggered it. Callers show
/// [`ApiError::display_message`] and let the user re-run the action.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error. Please try again.")]
    Network(#[source] reqwest::Error),

    /// Non-2xx with a `detail` list of field errors, joined with ", ".
    #[error("{message}")]
    Validation { status: u16, message: String },

    /// Non-2xx with a plain string `detail`.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Non-2xx whose body carries nothing displayable.
    #[error("Request failed with status {status}")]
    Status { status: u16, body: String },

    /// An authenticated call was attempted without a stored token.
    #[error("Authentication required")]
    Unauthenticated,

    /// 2xx response whose body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The call succeeded but the local session could not be saved or cleared.
    #[error("Could not update the saved session: {0}")]
    Store(#[from] crate::session::StoreError),
}

impl ApiError {
    /// Classifies a non-2xx response body.
    ///
    /// `{"detail": [{"msg": ..}, ..]}` becomes [`ApiError::Validation`],
    /// `{"detail": "..."}` becomes [`ApiError::Rejected`], anything else is
    /// kept raw in [`ApiError::Status`].
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| value.get("detail").cloned());

        match detail {
            Some(Value::Array(items)) if !items.is_empty() => {
                let message = items
                    .iter()
                    .map(|item| match item.get("msg") {
                        Some(Value::String(msg)) => msg.clone(),
                        Some(other) => other.to_string(),
                        None => item.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                ApiError::Validation { status, message }
            }
            Some(Value::String(message)) if !message.is_empty() => {
                ApiError::Rejected { status, message }
            }
            _ => ApiError::Status {
                status,
                body: body.to_string(),
            },
        }
    }

    /// HTTP status when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation { status, .. }
            | ApiError::Rejected { status, .. }
            | ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Banner text for this failure, using `fallback` when the server gave
    /// nothing displayable.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::Validation { message, .. } | ApiError::Rejected { message, .. } => {
                message.clone()
            }
            ApiError::Status { .. } | ApiError::Decode(_) => fallback.to_string(),
            ApiError::Unauthenticated | ApiError::Store(_) => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err)
        }
    }
}
