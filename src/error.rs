//! Application error taxonomy.
//!
//! Pages report one of three kinds of failure: the backend could not be
//! reached or refused the call, a form failed its checks before anything
//! was sent, or a related record the page expected does not exist.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::provider::ProviderError;
use crate::record::RecordId;
use crate::resources::FormErrors;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Backend(ProviderError),

    #[error(transparent)]
    Validation(#[from] FormErrors),

    #[error("{resource} {id} not available")]
    NotFound { resource: String, id: RecordId },
}

impl AppError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Backend(e) => e.error_code(),
            Self::Validation(_) => "E_VALIDATION",
            Self::NotFound { .. } => "E_NOT_FOUND",
        }
    }

    /// Text a page shows in place of a section that failed to load.
    #[must_use]
    pub fn section_text(&self, label: &str) -> String {
        match self {
            Self::Backend(_) => format!("Error loading {label}."),
            Self::Validation(errors) => errors.to_string(),
            Self::NotFound { .. } => "Not Available.".to_owned(),
        }
    }

    #[must_use]
    pub fn requires_logout(&self) -> bool {
        matches!(self, Self::Backend(e) if e.requires_logout())
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound { resource, id } => Self::NotFound { resource, id },
            other => Self::Backend(other),
        }
    }
}
