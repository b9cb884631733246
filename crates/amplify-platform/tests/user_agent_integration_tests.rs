//! End-to-end user agent assembly through the public API

#![allow(non_snake_case)]

use amplify_platform::prelude::*;
use amplify_platform::{CustomUserAgentRegistry, FrameworkDetection, ProbeDetector};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn Platform___probe_detection___feeds_framework_entry() {
    init_test_logging();
    let detector = ProbeDetector::new()
        .probe(Framework::Expo, || false)
        .probe(Framework::ReactNative, || true);
    let platform = Platform::default().with_detector(Arc::new(FrameworkDetection::new(detector)));

    let user_agent = platform.user_agent_string(Some(&UserAgentDetails::for_action(
        Category::Auth,
        "signIn",
    )));

    assert_eq!(user_agent, "aws-amplify/6.0.0 Auth/signIn framework/ReactNative");
    assert!(platform.is_react_native());
}

#[test]
fn Platform___custom_entries___follow_framework_in_registration_order() {
    init_test_logging();
    let registry = CustomUserAgentRegistry::new();
    let platform = Platform::default()
        .with_detector(Arc::new(Framework::React))
        .with_custom_source(Arc::new(registry.clone()));
    let handle = registry.set(SetCustomUserAgentInput::new(
        Category::Storage,
        ["uploadData", "downloadData"],
        vec![
            UserAgentEntry::pair("ui", "storage-browser"),
            UserAgentEntry::bare("beta"),
        ],
    ));

    let upload =
        platform.user_agent_string(Some(&UserAgentDetails::for_action("Storage", "uploadData")));
    let list =
        platform.user_agent_string(Some(&UserAgentDetails::for_action("Storage", "list")));
    handle.reset();
    let after_reset =
        platform.user_agent_string(Some(&UserAgentDetails::for_action("Storage", "uploadData")));

    assert_eq!(
        upload,
        "aws-amplify/6.0.0 Storage/uploadData framework/React ui/storage-browser beta"
    );
    assert_eq!(list, "aws-amplify/6.0.0 Storage/list framework/React");
    assert_eq!(after_reset, "aws-amplify/6.0.0 Storage/uploadData framework/React");
}

#[test]
fn Platform___config_from_json___changes_base_entry() {
    let config = PlatformConfig::from_json(br#"{"library_name": "amplify-rs", "version": "0.9.0"}"#)
        .unwrap();
    let platform = Platform::new(config)
        .unwrap()
        .with_detector(Arc::new(Framework::Svelte));

    let user_agent = platform.user_agent_object(None);

    assert_eq!(user_agent.entries()[0], UserAgentEntry::pair("amplify-rs", "0.9.0"));
    assert_eq!(user_agent.to_string(), "amplify-rs/0.9.0 framework/Svelte");
}

#[tokio::test(start_paused = true)]
async fn Platform___late_framework___observed_after_redetection() {
    init_test_logging();
    let loaded = Arc::new(AtomicBool::new(false));
    let probe_flag = Arc::clone(&loaded);
    let detector = ProbeDetector::new()
        .probe(Framework::Nuxt, move || probe_flag.load(Ordering::SeqCst))
        .browser_probe(|| true);
    let platform = Platform::default().with_detector(Arc::new(FrameworkDetection::new(detector)));
    let changes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&changes);
    platform.observe_framework_changes(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let early = platform.user_agent_string(None);
    loaded.store(true, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let late = platform.user_agent_string(None);

    assert_eq!(early, "aws-amplify/6.0.0 framework/WebUnknown");
    assert_eq!(late, "aws-amplify/6.0.0 framework/Nuxt");
    assert_eq!(changes.load(Ordering::SeqCst), 2);
}

#[test]
fn build_user_agent_string___global___is_stable_between_calls() {
    let first = build_user_agent_string(Some(&UserAgentDetails::for_action("API", "graphql")));
    let second = build_user_agent_string(Some(&UserAgentDetails::for_action("API", "graphql")));

    assert_eq!(first, second);
    assert!(first.starts_with("aws-amplify/6.0.0 API/graphql framework/"));
}
