use super::*;

#[test]
fn parse_error_reads_postgrest_body() {
    let err = parse_error(401, r#"{"code":"PGRST301","message":"JWT expired","details":null,"hint":null}"#);
    assert!(matches!(
        &err,
        ProviderError::Response { status: 401, code: Some(code), message } if code == "PGRST301" && message == "JWT expired"
    ));
    assert!(err.requires_logout());
}

#[test]
fn parse_error_reads_auth_msg_field() {
    let err = parse_error(400, r#"{"msg":"invalid token"}"#);
    assert!(matches!(err, ProviderError::Response { status: 400, code: None, ref message } if message == "invalid token"));
}

#[test]
fn parse_error_falls_back_to_raw_text() {
    let err = parse_error(502, "Bad Gateway");
    assert!(matches!(err, ProviderError::Response { status: 502, ref message, .. } if message == "Bad Gateway"));
    let err = parse_error(503, "");
    assert!(matches!(err, ProviderError::Response { ref message, .. } if message == "HTTP 503"));
}

#[test]
fn parse_rows_accepts_empty_body() {
    assert!(parse_rows("").unwrap().is_empty());
    assert_eq!(parse_rows(r#"[{"id":1},{"id":2}]"#).unwrap().len(), 2);
    assert!(matches!(parse_rows("{not json"), Err(ProviderError::Parse(_))));
}

#[test]
fn first_row_of_nothing_is_not_found() {
    let err = first_row(Vec::new(), "clients", &RecordId::new("c9")).unwrap_err();
    assert!(matches!(err, ProviderError::NotFound { ref resource, .. } if resource == "clients"));
}

#[test]
fn parse_user_id_reads_id_field() {
    assert_eq!(parse_user_id(r#"{"id":"u-1","email":"a@b.c"}"#).unwrap(), Some(RecordId::new("u-1")));
    assert_eq!(parse_user_id(r"{}").unwrap(), None);
}

#[test]
fn table_url_joins_base_and_resource() {
    let provider = RestProvider::new(BackendConfig::new("http://localhost:54321/", "anon")).unwrap();
    assert_eq!(provider.table_url("deals"), "http://localhost:54321/rest/v1/deals");
}
