//! Clients list with a detail pane for the focused client.

#[cfg(test)]
#[path = "clients_test.rs"]
mod clients_test;

use crate::context::AppContext;
use crate::error::AppError;
use crate::query::FilterComposer;
use crate::record::RecordId;
use crate::resources::{Client, ClientForm, Resource};
use crate::state::{ListQuery, Selection};

pub const PAGE_SIZE: u32 = 50;

pub struct ClientsPage {
    pub list: ListQuery<Client>,
    pub selection: Selection,
}

impl Default for ClientsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientsPage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            list: ListQuery::new(Client::NAME, FilterComposer::new().search_on("client"), PAGE_SIZE),
            selection: Selection::new(),
        }
    }

    pub fn set_search(&mut self, text: &str) -> bool {
        self.list.set_search(text)
    }

    pub async fn refresh(&mut self, ctx: &AppContext) {
        self.list.refresh(ctx.provider.as_ref()).await;
    }

    /// Click on a row: focus it, or unfocus it when already focused.
    pub fn toggle(&mut self, id: RecordId) {
        self.selection.toggle(id);
    }

    /// The focused client, if it is still on screen.
    #[must_use]
    pub fn selected(&self) -> Option<&Client> {
        self.selection.resolve(self.list.rows())
    }

    /// Heading of the detail pane.
    #[must_use]
    pub fn detail_heading(&self) -> &'static str {
        if self.selected().is_some() { "Client Details" } else { "Select a client to view details" }
    }

    /// # Errors
    ///
    /// Validation or backend failure; the list is left untouched.
    pub async fn create(&mut self, ctx: &AppContext, form: &ClientForm) -> Result<Client, AppError> {
        let client = super::submit::<Client, _>(ctx.provider.as_ref(), form).await?;
        self.list.invalidate();
        Ok(client)
    }

    /// # Errors
    ///
    /// Validation, not-found, or backend failure.
    pub async fn update(&mut self, ctx: &AppContext, id: &RecordId, form: &ClientForm) -> Result<Client, AppError> {
        let client = super::save::<Client, _>(ctx.provider.as_ref(), id, form).await?;
        self.list.invalidate();
        Ok(client)
    }

    /// # Errors
    ///
    /// Backend failure.
    pub async fn delete(&mut self, ctx: &AppContext, id: &RecordId) -> Result<(), AppError> {
        super::remove::<Client>(ctx.provider.as_ref(), id).await?;
        if self.selection.is_selected(id) {
            self.selection.clear();
        }
        self.list.invalidate();
        Ok(())
    }
}
