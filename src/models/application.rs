use serde::{Deserialize, Serialize};

/// Investor's unilateral signal toward a startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestLevel {
    Interested,
    NotInterested,
    #[serde(other)]
    Unknown,
}

impl InterestLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestLevel::Interested => "interested",
            InterestLevel::NotInterested => "not_interested",
            InterestLevel::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestStatus {
    pub id: i64,
    pub startup_id: i64,
    pub investor_id: i64,
    pub status: InterestLevel,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub startup_name: Option<String>,
    #[serde(default)]
    pub investor_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestUpdate {
    pub startup_id: i64,
    pub status: InterestLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendPitchDeckRequest {
    pub investor_id: i64,
}

/// Record of one pitch deck transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationLog {
    pub id: i64,
    pub startup_id: i64,
    pub investor_id: i64,
    #[serde(default)]
    pub pitch_deck_filename: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub log: Option<String>,
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub startup_name: Option<String>,
    #[serde(default)]
    pub investor_name: Option<String>,
}

/// Downloaded pitch deck contents.
#[derive(Debug, Clone)]
pub struct PitchDeck {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

impl PitchDeck {
    /// File extension taken from the filename, lowercased.
    pub fn extension(&self) -> Option<String> {
        self.filename
            .as_deref()
            .and_then(base_name)
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    /// Name to save the deck under inside a download directory.
    ///
    /// Only the final path component of the server-supplied filename is kept.
    /// Without a usable name this is `pitch-deck-<application_id>.<ext>`.
    pub fn file_name(&self, application_id: i64) -> String {
        match self.filename.as_deref().and_then(base_name) {
            Some(name) => name.to_string(),
            None => format!(
                "pitch-deck-{}.{}",
                application_id,
                self.extension().unwrap_or_else(|| "bin".to_string())
            ),
        }
    }

    /// Only PDFs can be previewed inline; everything else is a download.
    pub fn is_previewable(&self) -> bool {
        self.extension().as_deref() == Some("pdf")
            || self.content_type.as_deref() == Some("application/pdf")
    }
}

/// Last component of a `/` or `\\` separated path, if it names a file.
pub fn base_name(path: &str) -> Option<&str> {
    let name = path.rsplit(['/', '\\']).next()?.trim();
    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}
