//! Deals list with related client and accountable-person names.
//!
//! Names are looked up through a `RecordCache`, so each related row is
//! fetched once per page lifetime no matter how many deals point at it. A
//! reference that resolves to nothing renders as "Not Available.".
//!
//! Deal writes go through the same cache: the change is visible in
//! `detail` at once, replaced by the server's row on success and rolled
//! back on failure. The list is invalidated after every successful write.

#[cfg(test)]
#[path = "deals_test.rs"]
mod deals_test;

use serde_json::Value;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::error::AppError;
use crate::query::{FilterComposer, Sort};
use crate::record::RecordId;
use crate::provider::decode_record;
use crate::resources::{Client, Deal, DealForm, Profile, Resource, Validate};
use crate::state::{ListQuery, Lookup, RecordCache};

pub const PAGE_SIZE: u32 = 50;
pub const NOT_AVAILABLE: &str = "Not Available.";

/// A deal with its related names resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct DealRow {
    pub deal: Deal,
    pub client_name: String,
    pub accountable: String,
}

pub struct DealsPage {
    pub list: ListQuery<Deal>,
    related: RecordCache,
}

impl Default for DealsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DealsPage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            list: ListQuery::new(Deal::NAME, FilterComposer::new().search_on("title").status_on("status"), PAGE_SIZE)
                .with_sort(Sort::desc("deal_date")),
            related: RecordCache::new(),
        }
    }

    pub fn set_search(&mut self, text: &str) -> bool {
        self.list.set_search(text)
    }

    pub fn set_status(&mut self, status: Option<String>) -> bool {
        self.list.set_status(status)
    }

    pub async fn refresh(&mut self, ctx: &AppContext) {
        self.list.refresh(ctx.provider.as_ref()).await;
    }

    /// Current rows with related names. Empty unless the list has data.
    pub async fn rows(&mut self, ctx: &AppContext) -> Vec<DealRow> {
        let deals = self.list.rows().to_vec();
        let mut rows = Vec::with_capacity(deals.len());
        for deal in deals {
            let client_name = self.name_of(ctx, Client::NAME, deal.client_id.as_ref(), "client").await;
            let accountable = self.name_of(ctx, Profile::NAME, deal.profile_id.as_ref(), "fullname").await;
            rows.push(DealRow { deal, client_name, accountable });
        }
        rows
    }

    async fn name_of(&mut self, ctx: &AppContext, resource: &str, id: Option<&RecordId>, field: &str) -> String {
        let Some(id) = id else {
            return NOT_AVAILABLE.to_owned();
        };
        match self.related.get_or_fetch(ctx.provider.as_ref(), resource, id).await {
            Ok(Lookup::Found(record)) => match record.get(field) {
                Some(Value::String(name)) if !name.trim().is_empty() => name.clone(),
                _ => NOT_AVAILABLE.to_owned(),
            },
            Ok(Lookup::NotAvailable) => NOT_AVAILABLE.to_owned(),
            Err(e) => {
                warn!(resource, id = %id, error = %e, "related record lookup failed");
                NOT_AVAILABLE.to_owned()
            }
        }
    }

    /// One deal, read through the cache. `None` when the backend has no
    /// such deal.
    ///
    /// # Errors
    ///
    /// Backend failure other than not-found.
    pub async fn detail(&mut self, ctx: &AppContext, id: &RecordId) -> Result<Option<Deal>, AppError> {
        match self.related.get_or_fetch(ctx.provider.as_ref(), Deal::NAME, id).await? {
            Lookup::Found(record) => Ok(Some(decode_record(record)?)),
            Lookup::NotAvailable => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Validation or backend failure.
    pub async fn create(&mut self, ctx: &AppContext, form: &DealForm) -> Result<Deal, AppError> {
        form.validate()?;
        let created = self.related.create_through(ctx.provider.as_ref(), Deal::NAME, &form.to_values()?).await?;
        info!(resource = Deal::NAME, id = ?created.get("id"), "record created");
        self.list.invalidate();
        Ok(decode_record(created)?)
    }

    /// # Errors
    ///
    /// Validation, not-found, or backend failure.
    pub async fn update(&mut self, ctx: &AppContext, id: &RecordId, form: &DealForm) -> Result<Deal, AppError> {
        form.validate()?;
        let updated = self.related.update_through(ctx.provider.as_ref(), Deal::NAME, id, &form.to_values()?).await?;
        info!(resource = Deal::NAME, id = %id, "record updated");
        self.list.invalidate();
        Ok(decode_record(updated)?)
    }

    /// # Errors
    ///
    /// Backend failure; a cached copy of the deal is restored.
    pub async fn delete(&mut self, ctx: &AppContext, id: &RecordId) -> Result<(), AppError> {
        self.related.delete_through(ctx.provider.as_ref(), Deal::NAME, id).await?;
        info!(resource = Deal::NAME, id = %id, "record deleted");
        self.list.invalidate();
        Ok(())
    }
}
