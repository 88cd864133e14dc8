//! CRM dashboard: recent clients, the generic CRM record grid, and the
//! activity feed.
//!
//! DESIGN
//! ======
//! The three sections are fetched concurrently and applied separately. A
//! failed fetch or write marks only its own section; the others keep
//! whatever they last loaded.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use tokio::join;
use tracing::warn;

use super::{apply, execute};
use crate::context::AppContext;
use crate::error::AppError;
use crate::provider::decode_record;
use crate::query::{FilterComposer, Sort};
use crate::record::{Record, RecordId};
use crate::resources::{Activity, Client, Resource};
use crate::state::ListQuery;

pub const RECENT_CLIENTS: u32 = 5;
pub const CRM_RECORDS: u32 = 10;
pub const ACTIVITIES: u32 = 50;

/// Generic grid resource shown on the dashboard.
pub const CRM_RECORDS_RESOURCE: &str = "crmRecords";

pub struct DashboardPage {
    pub recent_clients: ListQuery<Client>,
    pub records: ListQuery<Record>,
    pub activities: ListQuery<Activity>,
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardPage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            recent_clients: ListQuery::new(Client::NAME, FilterComposer::new(), RECENT_CLIENTS).with_sort(Sort::desc("id")),
            records: ListQuery::new(CRM_RECORDS_RESOURCE, FilterComposer::new().search_on("name"), CRM_RECORDS),
            activities: ListQuery::new(Activity::NAME, FilterComposer::new().search_on("title"), ACTIVITIES),
        }
    }

    pub async fn refresh(&mut self, ctx: &AppContext) {
        let provider = ctx.provider.as_ref();
        let (clients, records, activities) = join!(
            execute(self.recent_clients.begin_fetch(), provider),
            execute(self.records.begin_fetch(), provider),
            execute(self.activities.begin_fetch(), provider),
        );
        apply(&mut self.recent_clients, clients);
        apply(&mut self.records, records);
        apply(&mut self.activities, activities);
    }

    /// Write `changes` to one activity. On failure the activity section
    /// shows its error text; the other sections are untouched.
    ///
    /// # Errors
    ///
    /// Not-found or backend failure.
    pub async fn update_activity(&mut self, ctx: &AppContext, id: &RecordId, changes: &Record) -> Result<Activity, AppError> {
        match ctx.provider.update(Activity::NAME, id, changes).await {
            Ok(updated) => {
                self.activities.invalidate();
                Ok(decode_record(updated)?)
            }
            Err(e) => {
                warn!(id = %id, error = %e, "activity update failed");
                self.activities.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    /// # Errors
    ///
    /// Backend failure, reported on the activity section.
    pub async fn delete_activity(&mut self, ctx: &AppContext, id: &RecordId) -> Result<(), AppError> {
        match super::remove::<Activity>(ctx.provider.as_ref(), id).await {
            Ok(()) => {
                self.activities.invalidate();
                Ok(())
            }
            Err(e) => {
                self.activities.fail(e.to_string());
                Err(e)
            }
        }
    }
}
