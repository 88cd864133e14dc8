//! Prospects list with company search, stage filter, in-place stage
//! changes, and migration of a prospect into a client.

#[cfg(test)]
#[path = "prospects_test.rs"]
mod prospects_test;

use serde_json::Value;
use tracing::info;

use crate::context::AppContext;
use crate::error::AppError;
use crate::provider::decode_record;
use crate::query::FilterComposer;
use crate::record::{Record, RecordId};
use crate::resources::{Client, ClientForm, Prospect, ProspectForm, ProspectStatus, Resource};
use crate::state::ListQuery;

pub const PAGE_SIZE: u32 = 50;

pub struct ProspectsPage {
    pub list: ListQuery<Prospect>,
}

impl Default for ProspectsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProspectsPage {
    #[must_use]
    pub fn new() -> Self {
        let composer = FilterComposer::new().search_on("company_name").status_on("status");
        Self { list: ListQuery::new(Prospect::NAME, composer, PAGE_SIZE) }
    }

    pub fn set_search(&mut self, text: &str) -> bool {
        self.list.set_search(text)
    }

    /// `None` shows every stage.
    pub fn set_stage_filter(&mut self, stage: Option<ProspectStatus>) -> bool {
        self.list.set_status(stage.map(|s| s.as_str().to_owned()))
    }

    pub async fn refresh(&mut self, ctx: &AppContext) {
        self.list.refresh(ctx.provider.as_ref()).await;
    }

    /// Move one prospect to `stage` and refetch the list.
    ///
    /// # Errors
    ///
    /// Not-found or backend failure; the list keeps its rows.
    pub async fn change_stage(&mut self, ctx: &AppContext, id: &RecordId, stage: ProspectStatus) -> Result<Prospect, AppError> {
        let mut values = Record::new();
        values.insert("status".to_owned(), Value::from(stage.as_str()));
        let updated = ctx.provider.update(Prospect::NAME, id, &values).await?;
        info!(id = %id, stage = stage.as_str(), "prospect stage changed");
        self.list.invalidate();
        self.list.refresh(ctx.provider.as_ref()).await;
        Ok(decode_record(updated)?)
    }

    /// # Errors
    ///
    /// Validation or backend failure.
    pub async fn create(&mut self, ctx: &AppContext, form: &ProspectForm) -> Result<Prospect, AppError> {
        let prospect = super::submit::<Prospect, _>(ctx.provider.as_ref(), form).await?;
        self.list.invalidate();
        Ok(prospect)
    }

    /// Client form pre-filled from the prospect `id`.
    ///
    /// # Errors
    ///
    /// `AppError::NotFound` when the prospect is gone, otherwise the
    /// backend failure.
    pub async fn migration_form(ctx: &AppContext, id: &RecordId) -> Result<ClientForm, AppError> {
        let record = ctx.provider.get_one(Prospect::NAME, id, None).await?;
        let prospect: Prospect = decode_record(record)?;
        Ok(ClientForm::from_prospect(&prospect))
    }

    /// Create the client described by a (possibly edited) migration form.
    ///
    /// # Errors
    ///
    /// Validation or backend failure.
    pub async fn migrate(ctx: &AppContext, form: &ClientForm) -> Result<Client, AppError> {
        super::submit::<Client, _>(ctx.provider.as_ref(), form).await
    }
}
