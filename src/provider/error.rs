//! Errors produced by data-provider calls.

use crate::record::RecordId;

/// Errors produced by list/read/write calls against the backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// The request never completed (connect, timeout, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("backend error: status {status}: {message}")]
    Response { status: u16, code: Option<String>, message: String },

    /// The response body could not be decoded.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// A single-record read found nothing.
    #[error("{resource} record not found: {id}")]
    NotFound { resource: String, id: RecordId },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ProviderError {
    /// Stable machine-readable code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_REQUEST",
            Self::Response { .. } => "E_RESPONSE",
            Self::Parse(_) => "E_PARSE",
            Self::NotFound { .. } => "E_NOT_FOUND",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Response { status: 429 | 500..=599, .. })
    }

    /// True when the session is no longer valid and the user must sign in
    /// again: an expired JWT (`PGRST301`) or a plain 401.
    #[must_use]
    pub fn requires_logout(&self) -> bool {
        match self {
            Self::Response { status, code, .. } => *status == 401 || code.as_deref() == Some("PGRST301"),
            _ => false,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}
