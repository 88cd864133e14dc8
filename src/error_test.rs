use super::*;
use crate::resources::ValidationError;

#[test]
fn provider_not_found_becomes_not_found() {
    let err = AppError::from(ProviderError::NotFound { resource: "clients".into(), id: RecordId::from(3) });
    assert!(matches!(err, AppError::NotFound { .. }));
    assert_eq!(err.section_text("client"), "Not Available.");
    assert_eq!(err.error_code(), "E_NOT_FOUND");
}

#[test]
fn transport_failure_is_backend_error() {
    let err = AppError::from(ProviderError::Request("timeout".into()));
    assert_eq!(err.error_code(), "E_REQUEST");
    assert_eq!(err.section_text("deals"), "Error loading deals.");
    assert!(!err.requires_logout());
}

#[test]
fn expired_session_requires_logout() {
    let err = AppError::from(ProviderError::Response {
        status: 401,
        code: Some("PGRST301".into()),
        message: "JWT expired".into(),
    });
    assert!(err.requires_logout());
}

#[test]
fn validation_errors_convert() {
    let err: AppError = FormErrors(vec![ValidationError { field: "name", message: "Name is required" }]).into();
    assert_eq!(err.error_code(), "E_VALIDATION");
    assert!(err.to_string().contains("Name is required"));
}
