use super::*;
use crate::record::HasId;
use crate::resources::Resource;
use serde_json::json;

#[test]
fn client_status_parses_case_insensitively() {
    assert_eq!(ClientStatus::parse(" Open "), Some(ClientStatus::Open));
    assert_eq!(ClientStatus::parse("won"), None);
    assert_eq!(serde_json::to_value(ClientStatus::Negotiations).unwrap(), json!("negotiations"));
}

#[test]
fn client_decodes_sparse_row() {
    let client: Client = serde_json::from_value(json!({"id": 7, "client": "Acme", "status": "closed", "phone": null})).unwrap();
    assert_eq!(client.record_id(), RecordId::from(7));
    assert_eq!(client.stage(), Some(ClientStatus::Closed));
    assert!(client.phone.is_none());
    assert_eq!(Client::NAME, "clients");
}

#[test]
fn deal_amount_accepts_number_or_text() {
    let numeric: Deal = serde_json::from_value(json!({"id": 1, "title": "T", "amount": 2500})).unwrap();
    let text: Deal = serde_json::from_value(json!({"id": 2, "title": "T", "amount": "2500"})).unwrap();
    assert_eq!(numeric.amount, text.amount);
}

#[test]
fn contact_subtitle_joins_email_and_phone() {
    let contact: Contact =
        serde_json::from_value(json!({"id": "c-1", "name": "Jane", "email": "j@x.io", "phone": "555"})).unwrap();
    assert_eq!(contact.subtitle(), "j@x.io - 555");
}
