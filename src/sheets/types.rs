// src/sheets/types.rs

use serde::Deserialize;
use serde_json::Value;

/// Rows of cells as the values API returns them. Rows may be ragged.
pub type Grid = Vec<Vec<Value>>;

/// Body of a successful `spreadsheets.values.get`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub range: Option<String>,
    pub major_dimension: Option<String>,
    /// Omitted by the API when the range holds no data.
    #[serde(default)]
    pub values: Option<Grid>,
}

/// Standard Google API error body: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ErrorEnvelope {
    /// `None` when the body is not a Google error envelope.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    pub fn into_message(self) -> Option<String> {
        self.error.message.filter(|m| !m.is_empty())
    }

    /// Pull a non-empty `error.message` out of a response body, if it has one.
    pub fn message_from(body: &str) -> Option<String> {
        Self::from_body(body).and_then(Self::into_message)
    }
}
