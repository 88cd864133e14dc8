//! Backend configuration parsed from environment variables.

use crate::query::DEFAULT_PAGE_SIZE;

pub const BACKEND_URL_VAR: &str = "FORGE_BACKEND_URL";
pub const API_KEY_VAR: &str = "FORGE_API_KEY";
pub const ACCESS_TOKEN_VAR: &str = "FORGE_ACCESS_TOKEN";
pub const REQUEST_TIMEOUT_VAR: &str = "FORGE_REQUEST_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_VAR: &str = "FORGE_CONNECT_TIMEOUT_SECS";
pub const PAGE_SIZE_VAR: &str = "FORGE_PAGE_SIZE";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    Missing { var: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project base URL without a trailing slash.
    pub base_url: String,
    /// Public (anon) key sent as the `apikey` header.
    pub api_key: String,
    /// User session token. Requests fall back to `api_key` when absent.
    pub access_token: Option<String>,
    pub timeouts: Timeouts,
    pub page_size: u32,
}

impl BackendConfig {
    #[must_use]
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            access_token: None,
            timeouts: Timeouts::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Build typed backend config from environment variables.
    ///
    /// Required:
    /// - `FORGE_BACKEND_URL`
    /// - `FORGE_API_KEY`
    ///
    /// Optional:
    /// - `FORGE_ACCESS_TOKEN`: bearer token for the signed-in user
    /// - `FORGE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `FORGE_CONNECT_TIMEOUT_SECS`: default 10
    /// - `FORGE_PAGE_SIZE`: default 10
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` when a required variable is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|_| None)
    }

    /// Like `from_env`, but `overrides` is asked for each variable first
    /// (e.g. command-line flags); the environment fills whatever it leaves
    /// unanswered.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` when a required variable is unset or
    /// empty in both places.
    pub fn from_env_with(overrides: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let lookup = |key: &str| overrides(key).or_else(|| std::env::var(key).ok()).filter(|v| !v.is_empty());

        let base_url = lookup(BACKEND_URL_VAR).ok_or_else(|| missing(BACKEND_URL_VAR))?;
        let api_key = lookup(API_KEY_VAR).ok_or_else(|| missing(API_KEY_VAR))?;
        let access_token = lookup(ACCESS_TOKEN_VAR);
        let timeouts = Timeouts {
            request_secs: parse_or(lookup(REQUEST_TIMEOUT_VAR), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(lookup(CONNECT_TIMEOUT_VAR), DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let page_size = parse_or(lookup(PAGE_SIZE_VAR), DEFAULT_PAGE_SIZE).max(1);

        Ok(Self { access_token, timeouts, page_size, ..Self::new(&base_url, api_key) })
    }

    /// Token sent as `Authorization: Bearer ...`.
    #[must_use]
    pub fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.api_key)
    }
}

fn missing(key: &str) -> ConfigError {
    ConfigError::Missing { var: key.to_owned() }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
