//! Data-access seam between pages and the hosted backend.
//!
//! DESIGN
//! ======
//! Every page reads and writes through `DataProvider`, a thin async CRUD
//! trait over named resources. `RestProvider` talks to the real backend;
//! `MemoryProvider` keeps tables in process for tests and offline use.
//! Rows cross the seam as JSON records and are decoded into typed
//! resources by the caller.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod error;
pub mod memory;
pub mod rest;

pub use error::ProviderError;
pub use memory::MemoryProvider;
pub use rest::RestProvider;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::query::{FilterDescriptor, Pagination, Sort};
use crate::record::{Record, RecordId};

/// One list call: which resource, which rows, which window.
#[derive(Clone, Debug, PartialEq)]
pub struct ListRequest {
    pub resource: String,
    pub filters: FilterDescriptor,
    pub sorters: Vec<Sort>,
    pub pagination: Pagination,
    /// Column list, e.g. `"*"` or `"id,client"`. `None` selects everything.
    pub select: Option<String>,
}

impl ListRequest {
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            filters: FilterDescriptor::new(),
            sorters: Vec::new(),
            pagination: Pagination::default(),
            select: None,
        }
    }

    #[must_use]
    pub fn filters(mut self, filters: FilterDescriptor) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorters.push(sort);
        self
    }

    #[must_use]
    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    /// Stable string identifying this request, used to skip identical refetches.
    #[must_use]
    pub fn cache_key(&self) -> String {
        let filters = serde_json::to_string(&self.filters).unwrap_or_default();
        let sorters = serde_json::to_string(&self.sorters).unwrap_or_default();
        format!(
            "{}|{}|{}|{}:{}|{}",
            self.resource,
            filters,
            sorters,
            self.pagination.page_size,
            self.pagination.current,
            self.select.as_deref().unwrap_or("*"),
        )
    }
}

/// Rows for the requested window plus the total count across all pages.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListResponse {
    pub data: Vec<Record>,
    pub total: u64,
}

/// Provider-neutral CRUD over named resources. Enables mocking in tests.
#[async_trait::async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetch one page of `request.resource` matching `request.filters`.
    async fn list(&self, request: &ListRequest) -> Result<ListResponse, ProviderError>;

    /// Fetch a single record. A missing row is `ProviderError::NotFound`.
    async fn get_one(&self, resource: &str, id: &RecordId, select: Option<&str>) -> Result<Record, ProviderError>;

    async fn create(&self, resource: &str, values: &Record) -> Result<Record, ProviderError>;

    async fn update(&self, resource: &str, id: &RecordId, values: &Record) -> Result<Record, ProviderError>;

    async fn delete(&self, resource: &str, id: &RecordId) -> Result<(), ProviderError>;
}

/// Decode a batch of records into typed rows.
///
/// # Errors
///
/// Returns `ProviderError::Parse` if any row does not fit `T`.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Record>) -> Result<Vec<T>, ProviderError> {
    rows.into_iter().map(decode_record).collect()
}

/// Decode one record into a typed row.
///
/// # Errors
///
/// Returns `ProviderError::Parse` if the record does not fit `T`.
pub fn decode_record<T: DeserializeOwned>(record: Record) -> Result<T, ProviderError> {
    Ok(serde_json::from_value(serde_json::Value::Object(record))?)
}

/// Encode a typed value as a record for create/update calls.
///
/// # Errors
///
/// Returns `ProviderError::Parse` if `value` does not serialize to a JSON object.
pub fn to_record<T: Serialize>(value: &T) -> Result<Record, ProviderError> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(ProviderError::Parse(format!("expected a JSON object, got {other}"))),
    }
}
