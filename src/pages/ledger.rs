//! Ledger grid with transaction-source titles resolved.

#[cfg(test)]
#[path = "ledger_test.rs"]
mod ledger_test;

use tokio::join;

use super::{apply, execute};
use crate::context::AppContext;
use crate::query::{DateCondition, FilterComposer, Sort};
use crate::resources::{LedgerEntry, Resource, TransactionSource};
use crate::state::ListQuery;

/// Sources are a small lookup table; fetch them in one page.
const SOURCE_LIMIT: u32 = 1000;

/// One grid row.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerRow {
    pub entry: LedgerEntry,
    pub source: String,
}

pub struct LedgerPage {
    pub entries: ListQuery<LedgerEntry>,
    pub sources: ListQuery<TransactionSource>,
}

impl LedgerPage {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        let composer = FilterComposer::new().search_on("details").status_on("entry_type").date_on("transaction_date");
        Self {
            entries: ListQuery::new(LedgerEntry::NAME, composer, page_size)
                .with_sort(Sort::desc("transaction_date"))
                .with_select("*"),
            sources: ListQuery::new(TransactionSource::NAME, FilterComposer::new(), SOURCE_LIMIT),
        }
    }

    pub fn set_search(&mut self, text: &str) -> bool {
        self.entries.set_search(text)
    }

    /// Filter on `entry_type` (e.g. "credit").
    pub fn set_entry_type(&mut self, entry_type: Option<String>) -> bool {
        self.entries.set_status(entry_type)
    }

    pub fn set_date(&mut self, date: Option<DateCondition>) -> bool {
        self.entries.set_date(date)
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        self.entries.set_page(page)
    }

    pub async fn refresh(&mut self, ctx: &AppContext) {
        let provider = ctx.provider.as_ref();
        let (entries, sources) =
            join!(execute(self.entries.begin_fetch(), provider), execute(self.sources.begin_fetch(), provider));
        apply(&mut self.entries, entries);
        apply(&mut self.sources, sources);
    }

    /// Rows with source titles. While sources are loading or failed, the raw
    /// source reference is shown.
    #[must_use]
    pub fn rows(&self) -> Vec<LedgerRow> {
        let sources = self.sources.rows();
        self.entries
            .rows()
            .iter()
            .map(|entry| LedgerRow { source: entry.source_label(sources).to_owned(), entry: entry.clone() })
            .collect()
    }
}
