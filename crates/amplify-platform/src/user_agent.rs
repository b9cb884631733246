//! User agent assembly and rendering
//!
//! A user agent is an ordered list of `(key, value)` entries:
//!
//! ```text
//! (library, version) [(category, action)] (framework, <detected>) [custom entries...]
//! ```
//!
//! It renders as the entries joined by single spaces, each entry either
//! `key/value` or a bare `key` when the value is missing.

use crate::{CustomUserAgentSource, FrameworkDetector, PlatformConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Key of the always-present framework entry
pub const FRAMEWORK_KEY: &str = "framework";

/// A single `(key, value)` user agent entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserAgentEntry(pub String, pub Option<String>);

impl UserAgentEntry {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self(key.into(), value)
    }

    /// Entry with a value
    pub fn pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self(key.into(), Some(value.into()))
    }

    /// Entry without a value, rendered as the bare key
    pub fn bare(key: impl Into<String>) -> Self {
        Self(key.into(), None)
    }

    pub fn key(&self) -> &str {
        &self.0
    }

    pub fn value(&self) -> Option<&str> {
        self.1.as_deref()
    }
}

impl fmt::Display for UserAgentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) if !self.0.is_empty() && !value.is_empty() => {
                write!(f, "{}/{}", self.0, value)
            }
            _ => f.write_str(&self.0),
        }
    }
}

impl<K, V> From<(K, V)> for UserAgentEntry
where
    K: Into<String>,
    V: Into<String>,
{
    fn from((key, value): (K, V)) -> Self {
        Self::pair(key, value)
    }
}

/// Ordered user agent entries
///
/// Insertion order is preserved and keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserAgent(Vec<UserAgentEntry>);

impl UserAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a user agent from its collaborators
    ///
    /// The detector is invoked exactly once per call. The custom source is
    /// only consulted when both category and action are present.
    pub fn assemble(
        config: &PlatformConfig,
        detector: &dyn FrameworkDetector,
        custom: &dyn CustomUserAgentSource,
        details: Option<&UserAgentDetails>,
    ) -> Self {
        let mut user_agent = Self::new();
        user_agent.push(UserAgentEntry::pair(
            config.library_name.as_str(),
            config.version.as_str(),
        ));

        let category = details.and_then(UserAgentDetails::category);
        let action = details.and_then(UserAgentDetails::action);

        if let Some(category) = category {
            user_agent.push(UserAgentEntry::new(category, action.map(str::to_string)));
        }

        user_agent.push(UserAgentEntry::pair(FRAMEWORK_KEY, detector.detect().name()));

        if let (Some(category), Some(action)) = (category, action) {
            if let Some(entries) = custom.custom_entries(category, action) {
                user_agent.extend(entries);
            }
        }

        trace!(user_agent = %user_agent, "assembled user agent");
        user_agent
    }

    pub fn push(&mut self, entry: UserAgentEntry) {
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[UserAgentEntry] {
        &self.0
    }

    pub fn into_entries(self) -> Vec<UserAgentEntry> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UserAgentEntry> {
        self.0.iter()
    }

    /// First entry with the given key
    pub fn get(&self, key: &str) -> Option<&UserAgentEntry> {
        self.0.iter().find(|entry| entry.key() == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, entry) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl Extend<UserAgentEntry> for UserAgent {
    fn extend<I: IntoIterator<Item = UserAgentEntry>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<UserAgentEntry> for UserAgent {
    fn from_iter<I: IntoIterator<Item = UserAgentEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for UserAgent {
    type Item = UserAgentEntry;
    type IntoIter = std::vec::IntoIter<UserAgentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a UserAgent {
    type Item = &'a UserAgentEntry;
    type IntoIter = std::slice::Iter<'a, UserAgentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Feature area and operation a call is made on behalf of
///
/// Empty strings are treated the same as absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgentDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl UserAgentDetails {
    pub fn new() -> Self {
        Self::default()
    }

    /// Details for `action` within `category`
    pub fn for_action(category: impl Into<String>, action: impl Into<String>) -> Self {
        Self::new().with_category(category).with_action(action)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Category, if present and non-empty
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|category| !category.is_empty())
    }

    /// Action, if present and non-empty
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref().filter(|action| !action.is_empty())
    }
}
