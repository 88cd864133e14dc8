//! Page controllers: one per admin screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each controller binds list queries, selection, and local lists to one
//! screen and talks to the backend only through the `AppContext` it is
//! handed. Sections of a page load and fail independently; a controller
//! never turns one section's failure into a page-wide error.
//!
//! The helpers below are the write path shared by every page: validate the
//! form, send it, decode the row the backend returns.

pub mod calendar;
pub mod clients;
pub mod contacts;
pub mod dashboard;
pub mod deals;
pub mod ledger;
pub mod profile;
pub mod prospects;

pub use calendar::{BookingError, CalendarPage};
pub use clients::ClientsPage;
pub use contacts::ContactsPage;
pub use dashboard::DashboardPage;
pub use deals::{DealRow, DealsPage};
pub use ledger::{LedgerPage, LedgerRow};
pub use profile::ProfilePage;
pub use prospects::ProspectsPage;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::AppError;
use crate::provider::{DataProvider, decode_record};
use crate::record::RecordId;
use crate::resources::{Resource, Validate};
use crate::state::{FetchOutcome, FetchTicket, ListQuery};

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

/// Validate `form` and create a `T` from it.
///
/// # Errors
///
/// `AppError::Validation` before any request is sent, otherwise the
/// provider's error.
pub async fn submit<T: Resource, F: Validate>(provider: &dyn DataProvider, form: &F) -> Result<T, AppError> {
    form.validate()?;
    let created = provider.create(T::NAME, &form.to_values()?).await?;
    info!(resource = T::NAME, id = ?created.get("id"), "record created");
    Ok(decode_record(created)?)
}

/// Validate `form` and write it over the record `id`.
///
/// # Errors
///
/// `AppError::Validation` before any request is sent, `AppError::NotFound`
/// when the record is gone, otherwise the provider's error.
pub async fn save<T: Resource, F: Validate>(provider: &dyn DataProvider, id: &RecordId, form: &F) -> Result<T, AppError> {
    form.validate()?;
    let updated = provider.update(T::NAME, id, &form.to_values()?).await?;
    info!(resource = T::NAME, id = %id, "record updated");
    Ok(decode_record(updated)?)
}

/// # Errors
///
/// Returns the provider's error.
pub async fn remove<T: Resource>(provider: &dyn DataProvider, id: &RecordId) -> Result<(), AppError> {
    provider.delete(T::NAME, id).await?;
    info!(resource = T::NAME, id = %id, "record deleted");
    Ok(())
}

/// Run a ticket if one was issued.
pub(crate) async fn execute(ticket: Option<FetchTicket>, provider: &dyn DataProvider) -> Option<FetchOutcome> {
    match ticket {
        Some(ticket) => Some(ticket.execute(provider).await),
        None => None,
    }
}

pub(crate) fn apply<T: DeserializeOwned>(query: &mut ListQuery<T>, outcome: Option<FetchOutcome>) {
    if let Some(outcome) = outcome {
        query.apply(outcome);
    }
}
