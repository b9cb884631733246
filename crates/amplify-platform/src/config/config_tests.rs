#![allow(non_snake_case)]

use super::*;

#[test]
fn PlatformConfig___default___has_expected_values() {
    let config = PlatformConfig::default();

    assert_eq!(config.library_name, "aws-amplify");
    assert_eq!(config.version, VERSION);
    assert_eq!(config.ssr_reset_timeout_ms, 10);
    assert_eq!(config.web_reset_timeout_ms, 10);
    assert_eq!(config.prime_framework_delay_ms, 1000);
}

#[test]
fn PlatformConfig___default___version_is_crate_version() {
    assert_eq!(VERSION, "6.0.0");
}

#[test]
fn PlatformConfig___user_agent_base___joins_name_and_version() {
    let config = PlatformConfig::default();

    assert_eq!(config.user_agent_base(), "aws-amplify/6.0.0");
}

#[test]
fn PlatformConfig___from_empty_bytes___returns_defaults() {
    let config = PlatformConfig::from_json(&[]).unwrap();

    assert_eq!(config, PlatformConfig::default());
}

#[test]
fn PlatformConfig___from_json___parses_partial_document() {
    let json = r#"{"version": "6.1.0", "prime_framework_delay_ms": 250}"#;

    let config = PlatformConfig::from_json(json.as_bytes()).unwrap();

    assert_eq!(config.library_name, "aws-amplify");
    assert_eq!(config.version, "6.1.0");
    assert_eq!(config.prime_framework_delay(), Duration::from_millis(250));
    assert_eq!(config.ssr_reset_timeout(), Duration::from_millis(10));
}

#[test]
fn PlatformConfig___from_json___rejects_malformed_json() {
    let result = PlatformConfig::from_json(b"{\"version\": ");

    assert!(matches!(result, Err(PlatformError::SerializationError(_))));
}

#[test]
fn PlatformConfig___from_json___rejects_empty_library_name() {
    let result = PlatformConfig::from_json(br#"{"library_name": ""}"#);

    assert!(matches!(result, Err(PlatformError::ConfigError(_))));
}

#[test]
fn PlatformConfig___validate___rejects_whitespace_in_library_name() {
    let config = PlatformConfig::default().with_library("aws amplify", "1.0.0");

    let result = config.validate();

    assert!(matches!(result, Err(PlatformError::ConfigError(_))));
}

#[test]
fn PlatformConfig___validate___rejects_blank_version() {
    let config = PlatformConfig::default().with_library("aws-amplify", "  ");

    assert!(config.validate().is_err());
}

#[test]
fn PlatformConfig___with_library___overrides_base() {
    let config = PlatformConfig::new().with_library("my-lib", "0.1.0");

    assert!(config.validate().is_ok());
    assert_eq!(config.user_agent_base(), "my-lib/0.1.0");
}
