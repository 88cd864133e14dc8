//! List state bound to one resource: inputs, request sequencing, result.
//!
//! DESIGN
//! ======
//! A `ListQuery` owns a page's filter inputs and the last result. Every
//! input change that alters the composed request moves the state to
//! `Loading`. Fetching is split in two so
//! several requests can be in flight at once without sharing state:
//! `begin_fetch` hands out a ticket tagged with a sequence number, the
//! ticket runs against a provider, and `apply` folds the outcome back in.
//! Only the outcome of the most recently issued ticket is applied; older
//! ones are discarded, so a slow response can never overwrite a newer one.
//!
//! The composed request doubles as a cache key: while the key is unchanged
//! and already fetched (or in flight), no new ticket is issued.

#[cfg(test)]
#[path = "list_test.rs"]
mod list_test;

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::provider::{DataProvider, ListRequest, ListResponse, ProviderError, decode_rows};
use crate::query::{DateCondition, FilterComposer, Pagination, QueryInputs, Sort};
use crate::record::RecordId;

/// What a list section shows right now.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Error(String),
    Data(Vec<T>),
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> QueryState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(reason) => Some(reason),
            _ => None,
        }
    }

    #[must_use]
    pub fn data(&self) -> Option<&[T]> {
        match self {
            Self::Data(rows) => Some(rows),
            _ => None,
        }
    }

    /// Placeholder text for a section labelled `label` (e.g. "contacts").
    /// `None` when there are rows to show.
    #[must_use]
    pub fn status_text(&self, label: &str) -> Option<String> {
        match self {
            Self::Loading => Some(format!("Loading {label}...")),
            Self::Error(_) => Some(format!("Error loading {label}.")),
            Self::Data(rows) if rows.is_empty() => Some(format!("No {label} found.")),
            Self::Data(_) => None,
        }
    }
}

/// A list request waiting to be run.
#[derive(Clone, Debug)]
pub struct FetchTicket {
    seq: u64,
    key: String,
    request: ListRequest,
}

impl FetchTicket {
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub fn request(&self) -> &ListRequest {
        &self.request
    }

    /// Run the request. Never fails: errors travel inside the outcome.
    pub async fn execute<P: DataProvider + ?Sized>(self, provider: &P) -> FetchOutcome {
        let result = provider.list(&self.request).await;
        FetchOutcome { seq: self.seq, key: self.key, result }
    }
}

/// Result of a ticket, to be applied to the query that issued it.
#[derive(Debug)]
pub struct FetchOutcome {
    seq: u64,
    key: String,
    result: Result<ListResponse, ProviderError>,
}

pub struct ListQuery<T> {
    resource: String,
    composer: FilterComposer,
    inputs: QueryInputs,
    pagination: Pagination,
    sorters: Vec<Sort>,
    select: Option<String>,
    state: QueryState<T>,
    total: u64,
    issued: u64,
    in_flight_key: Option<String>,
    applied_key: Option<String>,
    _rows: PhantomData<fn() -> T>,
}

impl<T> ListQuery<T> {
    #[must_use]
    pub fn new(resource: impl Into<String>, composer: FilterComposer, page_size: u32) -> Self {
        Self {
            resource: resource.into(),
            composer,
            inputs: QueryInputs::default(),
            pagination: Pagination::page_size(page_size),
            sorters: Vec::new(),
            select: None,
            state: QueryState::Loading,
            total: 0,
            issued: 0,
            in_flight_key: None,
            applied_key: None,
            _rows: PhantomData,
        }
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sorters.push(sort);
        self
    }

    #[must_use]
    pub fn with_select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    #[must_use]
    pub fn inputs(&self) -> &QueryInputs {
        &self.inputs
    }

    #[must_use]
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    #[must_use]
    pub fn state(&self) -> &QueryState<T> {
        &self.state
    }

    /// Rows currently displayed; empty unless the state is `Data`.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        self.state.data().unwrap_or(&[])
    }

    /// Total matching rows across all pages, as of the last applied fetch.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn status_text(&self, label: &str) -> Option<String> {
        self.state.status_text(label)
    }

    /// Returns true when the input actually changed.
    pub fn set_search(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        let next = if text.is_empty() { None } else { Some(text) };
        self.change(|inputs| &mut inputs.search, next)
    }

    pub fn set_parent(&mut self, parent: Option<RecordId>) -> bool {
        self.change(|inputs| &mut inputs.parent, parent)
    }

    pub fn set_status(&mut self, status: Option<String>) -> bool {
        let status = status.filter(|s| !s.is_empty());
        self.change(|inputs| &mut inputs.status, status)
    }

    pub fn set_date(&mut self, date: Option<DateCondition>) -> bool {
        self.change(|inputs| &mut inputs.date, date)
    }

    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        let next = Pagination::page_size(page_size);
        if next == self.pagination {
            return false;
        }
        let before = self.request().cache_key();
        self.pagination = next;
        self.settle(&before);
        true
    }

    pub fn set_page(&mut self, current: u32) -> bool {
        let current = current.max(1);
        if current == self.pagination.current {
            return false;
        }
        let before = self.request().cache_key();
        self.pagination.current = current;
        self.settle(&before);
        true
    }

    /// Force the next `begin_fetch` to issue a request, keeping current rows
    /// on screen until it lands. Used after writes to the same resource.
    pub fn invalidate(&mut self) {
        self.applied_key = None;
        self.in_flight_key = None;
    }

    /// Show `reason` in place of the rows, e.g. after a write to this
    /// section failed. Like a failed fetch, it is not retried until the
    /// inputs change or the query is invalidated.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.applied_key = Some(self.request().cache_key());
        self.in_flight_key = None;
        self.state = QueryState::Error(reason.into());
    }

    fn change<V: PartialEq>(&mut self, field: impl FnOnce(&mut QueryInputs) -> &mut Option<V>, next: Option<V>) -> bool {
        let before = self.request().cache_key();
        let slot = field(&mut self.inputs);
        if *slot == next {
            return false;
        }
        *slot = next;
        self.settle(&before);
        true
    }

    /// After an input change: if the composed request moved, the shown rows
    /// no longer answer it.
    fn settle(&mut self, before: &str) {
        if self.request().cache_key() != before {
            self.applied_key = None;
            self.state = QueryState::Loading;
        }
    }

    /// The request the current inputs describe.
    #[must_use]
    pub fn request(&self) -> ListRequest {
        ListRequest {
            resource: self.resource.clone(),
            filters: self.composer.compose(&self.inputs),
            sorters: self.sorters.clone(),
            pagination: self.pagination,
            select: self.select.clone(),
        }
    }

    /// True when the current request has been neither applied nor issued.
    #[must_use]
    pub fn needs_fetch(&self) -> bool {
        let key = self.request().cache_key();
        self.applied_key.as_deref() != Some(key.as_str()) && self.in_flight_key.as_deref() != Some(key.as_str())
    }

    /// Issue a ticket for the current request, or `None` when nothing changed.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if !self.needs_fetch() {
            return None;
        }
        let request = self.request();
        let key = request.cache_key();
        self.issued += 1;
        self.in_flight_key = Some(key.clone());
        debug!(resource = %self.resource, seq = self.issued, filters = request.filters.len(), "list fetch issued");
        Some(FetchTicket { seq: self.issued, key, request })
    }
}

impl<T: DeserializeOwned> ListQuery<T> {
    /// Fold a finished ticket into the state. Returns false when the outcome
    /// was superseded by a newer ticket and discarded.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.seq != self.issued || outcome.key != self.request().cache_key() {
            debug!(resource = %self.resource, seq = outcome.seq, latest = self.issued, "discarding stale list response");
            if outcome.seq == self.issued {
                self.in_flight_key = None;
            }
            return false;
        }
        self.in_flight_key = None;
        self.applied_key = Some(outcome.key);

        let decoded = outcome.result.and_then(|response| {
            let total = response.total;
            decode_rows::<T>(response.data).map(|rows| (rows, total))
        });
        match decoded {
            Ok((mut rows, total)) => {
                rows.truncate(self.pagination.page_size as usize);
                self.total = total;
                self.state = QueryState::Data(rows);
            }
            Err(e) => {
                warn!(resource = %self.resource, error = %e, "list fetch failed");
                self.state = QueryState::Error(e.to_string());
            }
        }
        true
    }

    /// Fetch if needed and apply the result.
    pub async fn refresh<P: DataProvider + ?Sized>(&mut self, provider: &P) {
        if let Some(ticket) = self.begin_fetch() {
            let outcome = ticket.execute(provider).await;
            self.apply(outcome);
        }
    }
}
