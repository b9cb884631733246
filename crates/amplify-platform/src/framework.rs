//! Framework and feature category identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host frameworks the library can detect.
///
/// Variants fall into three families: web (browser) frameworks, their
/// server-side rendering counterparts, and mobile frameworks. Each family
/// has an "unknown" member except mobile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Framework {
    /// Browser environment with no recognised framework.
    WebUnknown,
    React,
    #[serde(rename = "NextJs")]
    NextJs,
    Angular,
    #[serde(rename = "VueJs")]
    VueJs,
    Nuxt,
    Svelte,
    /// Server environment with no recognised framework.
    ServerSideUnknown,
    #[serde(rename = "ReactSSR")]
    ReactSsr,
    #[serde(rename = "NextJsSSR")]
    NextJsSsr,
    #[serde(rename = "AngularSSR")]
    AngularSsr,
    #[serde(rename = "VueJsSSR")]
    VueJsSsr,
    #[serde(rename = "NuxtSSR")]
    NuxtSsr,
    #[serde(rename = "SvelteSSR")]
    SvelteSsr,
    ReactNative,
    Expo,
}

impl Framework {
    /// Label rendered as the `framework` user agent value.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::WebUnknown => "WebUnknown",
            Self::React => "React",
            Self::NextJs => "NextJs",
            Self::Angular => "Angular",
            Self::VueJs => "VueJs",
            Self::Nuxt => "Nuxt",
            Self::Svelte => "Svelte",
            Self::ServerSideUnknown => "ServerSideUnknown",
            Self::ReactSsr => "ReactSSR",
            Self::NextJsSsr => "NextJsSSR",
            Self::AngularSsr => "AngularSSR",
            Self::VueJsSsr => "VueJsSSR",
            Self::NuxtSsr => "NuxtSSR",
            Self::SvelteSsr => "SvelteSSR",
            Self::ReactNative => "ReactNative",
            Self::Expo => "Expo",
        }
    }

    /// Numeric wire code: below 100 for web, 100s for server side, 200s for mobile.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::WebUnknown => "0",
            Self::React => "1",
            Self::NextJs => "2",
            Self::Angular => "3",
            Self::VueJs => "4",
            Self::Nuxt => "5",
            Self::Svelte => "6",
            Self::ServerSideUnknown => "100",
            Self::ReactSsr => "101",
            Self::NextJsSsr => "102",
            Self::AngularSsr => "103",
            Self::VueJsSsr => "104",
            Self::NuxtSsr => "105",
            Self::SvelteSsr => "106",
            Self::ReactNative => "201",
            Self::Expo => "202",
        }
    }

    /// Parse a framework from its name or its numeric code.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|framework| framework.name() == s || framework.code() == s)
    }

    /// True for the two "nothing recognised" fallbacks.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::WebUnknown | Self::ServerSideUnknown)
    }

    #[must_use]
    pub fn is_server_side(&self) -> bool {
        matches!(
            self,
            Self::ServerSideUnknown
                | Self::ReactSsr
                | Self::NextJsSsr
                | Self::AngularSsr
                | Self::VueJsSsr
                | Self::NuxtSsr
                | Self::SvelteSsr
        )
    }

    /// React Native and Expo.
    #[must_use]
    pub fn is_react_native(&self) -> bool {
        matches!(self, Self::ReactNative | Self::Expo)
    }

    /// Get all frameworks, ordered by wire code.
    #[must_use]
    pub fn all() -> &'static [Framework] {
        &[
            Self::WebUnknown,
            Self::React,
            Self::NextJs,
            Self::Angular,
            Self::VueJs,
            Self::Nuxt,
            Self::Svelte,
            Self::ServerSideUnknown,
            Self::ReactSsr,
            Self::NextJsSsr,
            Self::AngularSsr,
            Self::VueJsSsr,
            Self::NuxtSsr,
            Self::SvelteSsr,
            Self::ReactNative,
            Self::Expo,
        ]
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Feature areas that tag their calls in the user agent.
///
/// The user agent accepts any category string; this enum covers the
/// categories the library ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Api,
    Auth,
    Analytics,
    DataStore,
    Geo,
    InAppMessaging,
    Interactions,
    Predictions,
    PubSub,
    PushNotification,
    Storage,
}

impl Category {
    /// Label used as the category user agent key.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "API",
            Self::Auth => "Auth",
            Self::Analytics => "Analytics",
            Self::DataStore => "DataStore",
            Self::Geo => "Geo",
            Self::InAppMessaging => "InAppMessaging",
            Self::Interactions => "Interactions",
            Self::Predictions => "Predictions",
            Self::PubSub => "PubSub",
            Self::PushNotification => "PushNotification",
            Self::Storage => "Storage",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}
