use super::*;
use crate::provider::MemoryProvider;
use crate::resources::{Client, ClientForm, ClientStatus, Contact};
use serde_json::json;

#[tokio::test]
async fn submit_validates_before_sending() {
    let provider = MemoryProvider::new();
    let err = submit::<Client, _>(&provider, &ClientForm::default()).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(provider.calls("clients"), 0);
}

#[tokio::test]
async fn submit_decodes_created_row() {
    let provider = MemoryProvider::new();
    let form = ClientForm { client: "Acme".into(), status: Some(ClientStatus::Open), ..ClientForm::default() };
    let client = submit::<Client, _>(&provider, &form).await.unwrap();
    assert_eq!(client.id, RecordId::from(1));
    assert_eq!(client.status, "open");
}

#[tokio::test]
async fn save_of_missing_row_is_not_found() {
    let provider = MemoryProvider::new();
    let form = ClientForm { client: "Acme".into(), status: Some(ClientStatus::Open), ..ClientForm::default() };
    let err = save::<Client, _>(&provider, &RecordId::from(5), &form).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn remove_reports_backend_failure() {
    let provider = MemoryProvider::new();
    provider.seed("contacts", vec![json!({"id": 1, "name": "Jane"})]);
    provider.fail("contacts");
    let err = remove::<Contact>(&provider, &RecordId::from(1)).await.unwrap_err();
    assert!(matches!(err, AppError::Backend(_)));
}
