//! Error handling tests for ccpayment

use ccpayment::{CcPaymentError, CredentialStore, Credentials};
use uuid::Uuid;

#[test]
fn test_missing_app_id_error() {
    let error = CredentialStore::new().app_id().unwrap_err();

    let error_msg = error.to_string();
    assert!(
        error_msg.contains("Configuration error"),
        "Error message MUST contain 'Configuration error' - actual: {}",
        error_msg
    );
    assert!(
        error_msg.contains("Require app ID"),
        "Error message MUST name the missing app ID - actual: {}",
        error_msg
    );
}

#[test]
fn test_missing_app_secret_error() {
    let store = CredentialStore::new();
    store.set_app_id("app-1");
    let error = store.credentials().unwrap_err();

    let error_msg = error.to_string();
    assert!(
        error_msg.contains("Require app secret"),
        "Error message MUST name the missing app secret - actual: {}",
        error_msg
    );
}

#[test]
fn test_validation_error() {
    let error = CcPaymentError::validation("getCoinBalance needs coin_id");

    let error_msg = error.to_string();
    assert!(
        error_msg.contains("Validation error"),
        "Error message MUST contain 'Validation error' - actual: {}",
        error_msg
    );
    assert!(
        error_msg.contains("coin_id"),
        "Error message MUST contain the missing field - actual: {}",
        error_msg
    );
}

#[test]
fn test_transport_error_keeps_raw_payload() {
    let payload = r#"{"code":11002,"msg":"invalid sign"}"#;
    let error = CcPaymentError::transport(Some(400), payload);

    let error_msg = error.to_string();
    assert!(
        error_msg.contains(payload),
        "Error message MUST contain the raw payload - actual: {}",
        error_msg
    );
}

#[test]
fn test_decoding_error_is_not_transport_error() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error = CcPaymentError::decoding(json_error.to_string(), "{");

    assert!(error.is_decoding());
    assert!(!error.is_transport());
    assert!(
        error.to_string().contains("Decoding error"),
        "Error message MUST contain 'Decoding error' - actual: {}",
        error
    );
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
    let error: CcPaymentError = json_error.into();

    assert!(
        error.to_string().contains("JSON error"),
        "Error message MUST contain 'JSON error' - actual: {}",
        error
    );
}

#[test]
fn test_unknown_call_error_names_call() {
    let call_id = Uuid::new_v4();
    let error = CcPaymentError::UnknownCall { call_id };

    assert!(
        error.to_string().contains(&call_id.to_string()),
        "Error message MUST contain the call id - actual: {}",
        error
    );
}

#[test]
fn test_debug_formats() {
    let credentials = Credentials::new("app-1", "s3cret");
    let debug_str = format!("{:?}", credentials);
    assert!(
        !debug_str.contains("s3cret"),
        "Debug format MUST NOT leak the app secret - actual: {}",
        debug_str
    );

    let error = CcPaymentError::config("Require app ID. Please setup first.");
    let debug_str = format!("{:?}", error);
    assert!(
        debug_str.contains("Config"),
        "Debug format MUST contain variant name 'Config' - actual: {}",
        debug_str
    );
}
