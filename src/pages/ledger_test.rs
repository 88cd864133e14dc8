use super::*;
use crate::provider::MemoryProvider;
use crate::session::StaticIdentity;
use crate::state::ColorMode;
use serde_json::json;
use std::sync::Arc;
use time::macros::date;

fn setup() -> (Arc<MemoryProvider>, AppContext) {
    let provider = Arc::new(MemoryProvider::new());
    provider.seed(
        "ledger",
        vec![
            json!({"id": 1, "transaction_date": "2024-01-10", "amount": 100, "entry_type": "credit", "transaction_source": "src-a", "details": "Fuel refund"}),
            json!({"id": 2, "transaction_date": "2024-02-10", "amount": 40, "entry_type": "debit", "transaction_source": "src-x", "details": "Landing fee"}),
            json!({"id": 3, "transaction_date": "2024-03-10", "amount": null, "entry_type": "debit", "details": "Hangar"}),
        ],
    );
    provider.seed("transaction_sources", vec![json!({"id": "src-a", "title": "Stripe"})]);
    let ctx = AppContext::new(provider.clone(), Arc::new(StaticIdentity::anonymous()), ColorMode::Light);
    (provider, ctx)
}

#[tokio::test]
async fn rows_resolve_source_titles_with_fallbacks() {
    let (_, ctx) = setup();
    let mut page = LedgerPage::new(10);
    page.refresh(&ctx).await;
    let rows = page.rows();
    let sources: Vec<&str> = rows.iter().map(|r| r.source.as_str()).collect();
    assert_eq!(sources, vec!["-", "src-x", "Stripe"]);
    assert_eq!(rows[0].entry.amount_label(), "-");
}

#[tokio::test]
async fn source_failure_shows_raw_references() {
    let (provider, ctx) = setup();
    provider.fail("transaction_sources");
    let mut page = LedgerPage::new(10);
    page.refresh(&ctx).await;
    assert_eq!(page.rows()[2].source, "src-a");
    assert!(page.sources.state().error().is_some());
}

#[tokio::test]
async fn entry_type_and_date_filters_apply() {
    let (_, ctx) = setup();
    let mut page = LedgerPage::new(10);
    page.set_entry_type(Some("debit".into()));
    page.set_date(Some(DateCondition::on_or_after(date!(2024 - 03 - 01))));
    page.refresh(&ctx).await;
    let ids: Vec<String> = page.rows().iter().map(|r| r.entry.id.to_string()).collect();
    assert_eq!(ids, vec!["3"]);
}

#[tokio::test]
async fn paging_walks_entries() {
    let (_, ctx) = setup();
    let mut page = LedgerPage::new(2);
    page.refresh(&ctx).await;
    assert_eq!(page.rows().len(), 2);
    assert_eq!(page.entries.total(), 3);
    page.set_page(2);
    page.refresh(&ctx).await;
    assert_eq!(page.rows().len(), 1);
}
