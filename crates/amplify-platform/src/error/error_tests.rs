#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(PlatformError::ConfigError("test".into()), 1 ; "config error")]
#[test_case(PlatformError::SerializationError("test".into()), 2 ; "serialization error")]
fn PlatformError___variant___maps_to_correct_code(error: PlatformError, expected_code: u32) {
    assert_eq!(error.error_code(), expected_code);
}

#[test]
fn PlatformError___config_error___displays_message() {
    let error = PlatformError::ConfigError("library_name must not be empty".into());

    assert_eq!(
        error.to_string(),
        "configuration error: library_name must not be empty"
    );
}

#[test]
fn PlatformError___from_serde_json___becomes_serialization_error() {
    let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();

    let error: PlatformError = json_error.into();

    assert!(matches!(error, PlatformError::SerializationError(_)));
    assert!(error.to_string().starts_with("serialization error: "));
}
