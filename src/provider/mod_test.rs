use super::*;
use crate::query::Predicate;

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Row {
    id: RecordId,
    name: String,
}

#[test]
fn cache_key_changes_with_filters_and_page() {
    let base = ListRequest::new("contacts");
    let filtered = base.clone().filters(FilterDescriptor::new().with(Predicate::contains("name", "Jane")));
    let paged = base.clone().pagination(Pagination::page_size(50));
    assert_ne!(base.cache_key(), filtered.cache_key());
    assert_ne!(base.cache_key(), paged.cache_key());
    assert_eq!(base.cache_key(), ListRequest::new("contacts").cache_key());
}

#[test]
fn decode_rows_reads_typed_records() {
    let rows = vec![
        serde_json::json!({"id": "a", "name": "Jane"}).as_object().cloned().unwrap(),
        serde_json::json!({"id": 2, "name": "John", "extra": true}).as_object().cloned().unwrap(),
    ];
    let decoded: Vec<Row> = decode_rows(rows).unwrap();
    assert_eq!(decoded[0], Row { id: RecordId::new("a"), name: "Jane".into() });
    assert_eq!(decoded[1].id, RecordId::from(2));
}

#[test]
fn decode_rows_reports_shape_mismatch_as_parse_error() {
    let rows = vec![serde_json::json!({"id": "a"}).as_object().cloned().unwrap()];
    let err = decode_rows::<Row>(rows).unwrap_err();
    assert!(matches!(err, ProviderError::Parse(_)));
}

#[test]
fn to_record_rejects_non_objects() {
    assert!(to_record(&Row { id: RecordId::new("a"), name: "x".into() }).is_ok());
    assert!(matches!(to_record(&5), Err(ProviderError::Parse(_))));
}

#[test]
fn requires_logout_on_expired_jwt_or_401() {
    let expired = ProviderError::Response { status: 400, code: Some("PGRST301".into()), message: "jwt".into() };
    let unauthorized = ProviderError::Response { status: 401, code: None, message: "no".into() };
    let other = ProviderError::Response { status: 500, code: None, message: "boom".into() };
    assert!(expired.requires_logout());
    assert!(unauthorized.requires_logout());
    assert!(!other.requires_logout());
    assert!(other.retryable());
    assert!(!ProviderError::Parse("x".into()).requires_logout());
}

#[test]
fn error_codes_are_stable() {
    assert_eq!(ProviderError::Request("x".into()).error_code(), "E_REQUEST");
    let nf = ProviderError::NotFound { resource: "clients".into(), id: RecordId::new("c") };
    assert_eq!(nf.error_code(), "E_NOT_FOUND");
    assert!(nf.is_not_found());
}
