//! Property-based tests for user agent assembly
//!
//! Checks the ordering and rendering rules hold for arbitrary category,
//! action, framework and custom entry inputs.

use amplify_platform::{
    Framework, PlatformConfig, UserAgent, UserAgentDetails, UserAgentEntry,
};
use proptest::prelude::*;

// Strategy: Any framework variant
fn arb_framework() -> impl Strategy<Value = Framework> {
    proptest::sample::select(Framework::all().to_vec())
}

// Strategy: Optional free-form detail strings, including empty ones
fn arb_detail() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z]{0,12}")
}

// Strategy: Custom entries with optional values
fn arb_custom_entries() -> impl Strategy<Value = Vec<UserAgentEntry>> {
    proptest::collection::vec(
        ("[a-z]{1,8}", proptest::option::of("[a-z0-9.]{1,8}"))
            .prop_map(|(key, value)| UserAgentEntry::new(key, value)),
        0..4,
    )
}

fn assemble(
    framework: Framework,
    details: &UserAgentDetails,
    custom: &[UserAgentEntry],
) -> UserAgent {
    let custom = custom.to_vec();
    let source = move |_: &str, _: &str| Some(custom.clone());
    UserAgent::assemble(&PlatformConfig::default(), &framework, &source, Some(details))
}

proptest! {
    /// Property: library entry first, framework entry always present
    #[test]
    fn proptest_user_agent_has_library_and_framework(
        framework in arb_framework(),
        category in arb_detail(),
        action in arb_detail(),
        custom in arb_custom_entries()
    ) {
        let details = UserAgentDetails { category, action };

        let user_agent = assemble(framework, &details, &custom);

        prop_assert!(user_agent.len() >= 2);
        prop_assert_eq!(&user_agent.entries()[0], &UserAgentEntry::pair("aws-amplify", "6.0.0"));
        let framework_index = if details.category().is_some() { 2 } else { 1 };
        prop_assert_eq!(
            &user_agent.entries()[framework_index],
            &UserAgentEntry::pair("framework", framework.name())
        );
    }

    /// Property: custom entries appear last, in order, only with category and action
    #[test]
    fn proptest_custom_entries_are_suffix(
        framework in arb_framework(),
        category in arb_detail(),
        action in arb_detail(),
        custom in arb_custom_entries()
    ) {
        let details = UserAgentDetails { category, action };
        let expects_custom = details.category().is_some() && details.action().is_some();

        let user_agent = assemble(framework, &details, &custom);
        let base_len = if details.category().is_some() { 3 } else { 2 };

        if expects_custom {
            prop_assert_eq!(user_agent.len(), base_len + custom.len());
            prop_assert_eq!(&user_agent.entries()[base_len..], custom.as_slice());
        } else {
            prop_assert_eq!(user_agent.len(), base_len);
        }
    }

    /// Property: the string form is the entries rendered and joined by spaces
    #[test]
    fn proptest_string_matches_rendered_entries(
        framework in arb_framework(),
        category in arb_detail(),
        action in arb_detail(),
        custom in arb_custom_entries()
    ) {
        let details = UserAgentDetails { category, action };

        let user_agent = assemble(framework, &details, &custom);
        let tokens: Vec<String> = user_agent
            .iter()
            .map(|entry| match entry.value() {
                Some(value) if !value.is_empty() => format!("{}/{}", entry.key(), value),
                _ => entry.key().to_string(),
            })
            .collect();

        prop_assert_eq!(user_agent.to_string(), tokens.join(" "));
    }
}
