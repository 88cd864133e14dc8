//! Ledger entries and the transaction-source lookup table.

#[cfg(test)]
#[path = "ledger_test.rs"]
mod ledger_test;

use serde::{Deserialize, Serialize};

use super::{display_or, lenient_text};
use crate::record::RecordId;

/// Placeholder for empty cells.
pub const EMPTY_CELL: &str = "-";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub transaction_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub entry_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sale: Option<String>,
    /// Id of a `transaction_sources` row.
    #[serde(default, deserialize_with = "lenient_text")]
    pub transaction_source: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub internal_details: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub deal: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub responsible_person: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sales_person: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub account_details: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub invoice_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub updated_at: Option<String>,
}

impl LedgerEntry {
    /// Amount cell text; a missing or blank amount shows a dash.
    #[must_use]
    pub fn amount_label(&self) -> &str {
        display_or(self.amount.as_deref(), EMPTY_CELL)
    }

    /// Title of the referenced transaction source, else the raw reference,
    /// else a dash.
    #[must_use]
    pub fn source_label<'a>(&'a self, sources: &'a [TransactionSource]) -> &'a str {
        let raw = self.transaction_source.as_deref();
        let title = raw
            .and_then(|id| sources.iter().find(|source| source.id.as_str() == id))
            .and_then(|source| source.title.as_deref())
            .filter(|title| !title.trim().is_empty());
        match title {
            Some(title) => title,
            None => display_or(raw, EMPTY_CELL),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionSource {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
}

resource! {
    LedgerEntry => "ledger",
    TransactionSource => "transaction_sources",
}
