//! Custom user agent entries registered per feature API

use crate::UserAgentEntry;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Lookup of extra user agent entries for a `(category, action)` pair
pub trait CustomUserAgentSource: Send + Sync {
    /// Entries to append after the framework entry, in order
    fn custom_entries(&self, category: &str, action: &str) -> Option<Vec<UserAgentEntry>>;
}

impl<F> CustomUserAgentSource for F
where
    F: Fn(&str, &str) -> Option<Vec<UserAgentEntry>> + Send + Sync,
{
    fn custom_entries(&self, category: &str, action: &str) -> Option<Vec<UserAgentEntry>> {
        self(category, action)
    }
}

/// Source that never contributes entries
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCustomUserAgent;

impl CustomUserAgentSource for NoCustomUserAgent {
    fn custom_entries(&self, _category: &str, _action: &str) -> Option<Vec<UserAgentEntry>> {
        None
    }
}

/// Request to attach entries to a set of APIs in one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCustomUserAgentInput {
    pub category: String,
    pub apis: Vec<String>,
    pub additional_details: Vec<UserAgentEntry>,
}

impl SetCustomUserAgentInput {
    pub fn new<I, S>(
        category: impl Into<String>,
        apis: I,
        additional_details: Vec<UserAgentEntry>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.into(),
            apis: apis.into_iter().map(Into::into).collect(),
            additional_details,
        }
    }
}

#[derive(Debug)]
struct ApiState {
    ref_count: usize,
    additional_details: Vec<UserAgentEntry>,
}

type RegistryState = HashMap<String, HashMap<String, ApiState>>;

/// Reference-counted registry of custom user agent entries
///
/// Each [`set`](Self::set) overwrites the entries for its APIs and bumps
/// their reference count. The returned handle undoes exactly that
/// registration: an API's state is removed once every registration that
/// touched it has been reset, and the category goes with its last API.
///
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct CustomUserAgentRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl CustomUserAgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `additional_details` to every API in `input`
    pub fn set(&self, input: SetCustomUserAgentInput) -> CustomUserAgentHandle {
        let SetCustomUserAgentInput {
            category,
            apis,
            additional_details,
        } = input;

        {
            let mut state = self.state.write();
            let category_state = state.entry(category.clone()).or_default();
            for api in &apis {
                let api_state = category_state.entry(api.clone()).or_insert(ApiState {
                    ref_count: 0,
                    additional_details: Vec::new(),
                });
                api_state.ref_count += 1;
                api_state.additional_details = additional_details.clone();
            }
        }

        debug!(category = %category, apis = ?apis, "custom user agent set");

        CustomUserAgentHandle {
            state: Arc::clone(&self.state),
            category,
            apis,
        }
    }

    /// Number of live registrations for an API
    pub fn ref_count(&self, category: &str, api: &str) -> usize {
        self.state
            .read()
            .get(category)
            .and_then(|apis| apis.get(api))
            .map_or(0, |api_state| api_state.ref_count)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.state.read().contains_key(category)
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }
}

impl CustomUserAgentSource for CustomUserAgentRegistry {
    fn custom_entries(&self, category: &str, action: &str) -> Option<Vec<UserAgentEntry>> {
        self.state
            .read()
            .get(category)?
            .get(action)
            .map(|api_state| api_state.additional_details.clone())
    }
}

/// Undoes a single [`CustomUserAgentRegistry::set`] call
///
/// Dropping the handle without calling [`reset`](Self::reset) keeps the
/// registration in place.
#[must_use = "dropping the handle leaves the custom user agent registered"]
#[derive(Debug)]
pub struct CustomUserAgentHandle {
    state: Arc<RwLock<RegistryState>>,
    category: String,
    apis: Vec<String>,
}

impl CustomUserAgentHandle {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn apis(&self) -> &[String] {
        &self.apis
    }

    /// Release this registration
    pub fn reset(self) {
        let mut state = self.state.write();
        let Some(category_state) = state.get_mut(&self.category) else {
            return;
        };

        for api in &self.apis {
            let remove = match category_state.get_mut(api) {
                Some(api_state) if api_state.ref_count > 1 => {
                    api_state.ref_count -= 1;
                    false
                }
                Some(_) => true,
                None => false,
            };
            if remove {
                category_state.remove(api);
            }
        }

        if category_state.is_empty() {
            state.remove(&self.category);
        }
        drop(state);

        debug!(category = %self.category, apis = ?self.apis, "custom user agent reset");
    }
}
