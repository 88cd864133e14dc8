//! REST provider for the hosted backend's PostgREST and auth endpoints.
//!
//! Thin HTTP wrapper around `/rest/v1/{resource}` and `/auth/v1/user`.
//! Response parsing lives in pure functions for testability.

#[cfg(test)]
#[path = "rest_test.rs"]
mod rest_test;

use std::time::Duration;

use reqwest::RequestBuilder;
use reqwest::header::CONTENT_RANGE;
use tracing::debug;

use super::{DataProvider, ListRequest, ListResponse, ProviderError};
use crate::config::BackendConfig;
use crate::query::postgrest::{encode_list_query, parse_content_range_total};
use crate::record::{Record, RecordId};
use crate::session::IdentitySource;

const REST_PREFIX: &str = "/rest/v1";
const AUTH_USER_PATH: &str = "/auth/v1/user";

// =============================================================================
// CLIENT
// =============================================================================

pub struct RestProvider {
    http: reqwest::Client,
    config: BackendConfig,
}

impl RestProvider {
    /// Build a provider with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the HTTP client cannot be constructed.
    pub fn new(config: BackendConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ProviderError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn table_url(&self, resource: &str) -> String {
        format!("{}{REST_PREFIX}/{resource}", self.config.base_url)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.config.bearer())
    }

    /// Send and return `(content-range, body)`, mapping non-2xx to an error.
    async fn send(&self, builder: RequestBuilder) -> Result<(Option<String>, String), ProviderError> {
        let response = self
            .authed(builder)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(parse_error(status, &text));
        }
        Ok((range, text))
    }
}

#[async_trait::async_trait]
impl DataProvider for RestProvider {
    async fn list(&self, request: &ListRequest) -> Result<ListResponse, ProviderError> {
        let params = encode_list_query(
            &request.filters,
            &request.sorters,
            Some(&request.pagination),
            request.select.as_deref(),
        );
        debug!(resource = %request.resource, filters = request.filters.len(), "list request");
        let builder = self
            .http
            .get(self.table_url(&request.resource))
            .query(&params)
            .header("Prefer", "count=exact");
        let (range, text) = self.send(builder).await?;
        let data = parse_rows(&text)?;
        let total = range
            .as_deref()
            .and_then(parse_content_range_total)
            .unwrap_or(data.len() as u64);
        Ok(ListResponse { data, total })
    }

    async fn get_one(&self, resource: &str, id: &RecordId, select: Option<&str>) -> Result<Record, ProviderError> {
        let params = [
            ("select", select.unwrap_or("*").to_owned()),
            ("id", format!("eq.{id}")),
            ("limit", "1".to_owned()),
        ];
        let builder = self.http.get(self.table_url(resource)).query(&params);
        let (_, text) = self.send(builder).await?;
        first_row(parse_rows(&text)?, resource, id)
    }

    async fn create(&self, resource: &str, values: &Record) -> Result<Record, ProviderError> {
        let builder = self
            .http
            .post(self.table_url(resource))
            .header("Prefer", "return=representation")
            .json(values);
        let (_, text) = self.send(builder).await?;
        parse_rows(&text)?
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Parse("create returned no rows".to_owned()))
    }

    async fn update(&self, resource: &str, id: &RecordId, values: &Record) -> Result<Record, ProviderError> {
        let builder = self
            .http
            .patch(self.table_url(resource))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(values);
        let (_, text) = self.send(builder).await?;
        first_row(parse_rows(&text)?, resource, id)
    }

    async fn delete(&self, resource: &str, id: &RecordId) -> Result<(), ProviderError> {
        let builder = self
            .http
            .delete(self.table_url(resource))
            .query(&[("id", format!("eq.{id}"))]);
        self.send(builder).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl IdentitySource for RestProvider {
    async fn current_user_id(&self) -> Result<Option<RecordId>, ProviderError> {
        let url = format!("{}{AUTH_USER_PATH}", self.config.base_url);
        match self.send(self.http.get(url)).await {
            Ok((_, text)) => parse_user_id(&text),
            Err(ProviderError::Response { status: 401 | 403, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(serde::Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    msg: Option<String>,
}

fn parse_error(status: u16, text: &str) -> ProviderError {
    let body: Option<ErrorBody> = serde_json::from_str(text).ok();
    let (code, message) = match body {
        Some(b) => (b.code, b.message.or(b.msg)),
        None => (None, None),
    };
    let message = message.unwrap_or_else(|| {
        if text.is_empty() { format!("HTTP {status}") } else { text.to_owned() }
    });
    ProviderError::Response { status, code, message }
}

fn parse_rows(text: &str) -> Result<Vec<Record>, ProviderError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text).map_err(|e| ProviderError::Parse(e.to_string()))
}

fn first_row(rows: Vec<Record>, resource: &str, id: &RecordId) -> Result<Record, ProviderError> {
    rows.into_iter()
        .next()
        .ok_or_else(|| ProviderError::NotFound { resource: resource.to_owned(), id: id.clone() })
}

fn parse_user_id(text: &str) -> Result<Option<RecordId>, ProviderError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(|e| ProviderError::Parse(e.to_string()))?;
    Ok(value.get("id").and_then(RecordId::from_value))
}
