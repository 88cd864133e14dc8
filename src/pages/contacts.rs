//! Contacts list filtered by free-text search or by the selected client.
//!
//! Typing a search term overrides the client selector: with both set, only
//! the name search applies. `with_precedence(Precedence::Combine)` ANDs them
//! instead.

#[cfg(test)]
#[path = "contacts_test.rs"]
mod contacts_test;

use tokio::join;

use super::{apply, execute};
use crate::context::AppContext;
use crate::error::AppError;
use crate::query::{FilterComposer, Precedence, Sort};
use crate::record::RecordId;
use crate::resources::{Client, Contact, ContactForm, Resource};
use crate::state::ListQuery;

/// Clients offered in the selector.
const CLIENT_OPTIONS: u32 = 100;

pub struct ContactsPage {
    pub contacts: ListQuery<Contact>,
    pub clients: ListQuery<Client>,
}

impl ContactsPage {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self::with_precedence(page_size, Precedence::default())
    }

    #[must_use]
    pub fn with_precedence(page_size: u32, precedence: Precedence) -> Self {
        let composer = FilterComposer::new().search_on("name").parent_on("client_id").precedence(precedence);
        Self {
            contacts: ListQuery::new(Contact::NAME, composer, page_size),
            clients: ListQuery::new(Client::NAME, FilterComposer::new(), CLIENT_OPTIONS).with_sort(Sort::asc("client")),
        }
    }

    pub fn set_search(&mut self, text: &str) -> bool {
        self.contacts.set_search(text)
    }

    pub fn select_client(&mut self, client: Option<RecordId>) -> bool {
        self.contacts.set_parent(client)
    }

    /// Load both sections; each keeps its own state on failure.
    pub async fn refresh(&mut self, ctx: &AppContext) {
        let provider = ctx.provider.as_ref();
        let (contacts, clients) =
            join!(execute(self.contacts.begin_fetch(), provider), execute(self.clients.begin_fetch(), provider));
        apply(&mut self.contacts, contacts);
        apply(&mut self.clients, clients);
    }

    /// # Errors
    ///
    /// Validation or backend failure.
    pub async fn create(&mut self, ctx: &AppContext, form: &ContactForm) -> Result<Contact, AppError> {
        let contact = super::submit::<Contact, _>(ctx.provider.as_ref(), form).await?;
        self.contacts.invalidate();
        Ok(contact)
    }

    /// # Errors
    ///
    /// Backend failure.
    pub async fn delete(&mut self, ctx: &AppContext, id: &RecordId) -> Result<(), AppError> {
        super::remove::<Contact>(ctx.provider.as_ref(), id).await?;
        self.contacts.invalidate();
        Ok(())
    }
}
