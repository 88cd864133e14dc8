//! Identity of the signed-in user.
//!
//! Pages scope "my records" queries (bookings, profile) by the current
//! user's id. Sign-in itself happens elsewhere; this module only reads
//! who is signed in.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::provider::ProviderError;
use crate::record::RecordId;

/// Source of the current user's id.
#[async_trait::async_trait]
pub trait IdentitySource: Send + Sync {
    /// `Ok(None)` when nobody is signed in.
    async fn current_user_id(&self) -> Result<Option<RecordId>, ProviderError>;
}

/// Fixed identity, for tests and for command-line use with a known user.
#[derive(Clone, Debug, Default)]
pub struct StaticIdentity(Option<RecordId>);

impl StaticIdentity {
    #[must_use]
    pub fn signed_in(id: impl Into<RecordId>) -> Self {
        Self(Some(id.into()))
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait::async_trait]
impl IdentitySource for StaticIdentity {
    async fn current_user_id(&self) -> Result<Option<RecordId>, ProviderError> {
        Ok(self.0.clone())
    }
}
