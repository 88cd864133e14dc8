//! Dependencies handed to every page controller.
//!
//! DESIGN
//! ======
//! Built once at the composition root and passed down by reference or
//! clone. All fields are `Arc`-wrapped so clones share one provider, one
//! identity source, and one color mode; no page reaches for a global.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::sync::{Arc, PoisonError, RwLock};

use crate::config::BackendConfig;
use crate::provider::{DataProvider, ProviderError, RestProvider};
use crate::record::RecordId;
use crate::session::IdentitySource;
use crate::state::ColorMode;

#[derive(Clone)]
pub struct AppContext {
    pub provider: Arc<dyn DataProvider>,
    pub identity: Arc<dyn IdentitySource>,
    theme: Arc<RwLock<ColorMode>>,
}

impl AppContext {
    #[must_use]
    pub fn new(provider: Arc<dyn DataProvider>, identity: Arc<dyn IdentitySource>, theme: ColorMode) -> Self {
        Self { provider, identity, theme: Arc::new(RwLock::new(theme)) }
    }

    /// Context backed by the hosted backend, which also answers identity.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::HttpClientBuild` if the HTTP client cannot be built.
    pub fn from_config(config: BackendConfig, theme: ColorMode) -> Result<Self, ProviderError> {
        let rest = Arc::new(RestProvider::new(config)?);
        Ok(Self::new(rest.clone(), rest, theme))
    }

    #[must_use]
    pub fn theme(&self) -> ColorMode {
        *self.theme.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Flip the color mode for every holder of this context.
    pub fn toggle_theme(&self) -> ColorMode {
        let mut mode = self.theme.write().unwrap_or_else(PoisonError::into_inner);
        *mode = mode.toggled();
        *mode
    }

    /// # Errors
    ///
    /// Returns the identity source's error.
    pub async fn current_user_id(&self) -> Result<Option<RecordId>, ProviderError> {
        self.identity.current_user_id().await
    }
}
