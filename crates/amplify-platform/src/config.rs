//! Platform configuration types

use crate::{PlatformError, PlatformResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Library name reported as the first user agent entry
pub const BASE_USER_AGENT: &str = "aws-amplify";

/// Library version reported alongside [`BASE_USER_AGENT`]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Immutable platform configuration, fixed for the lifetime of a [`Platform`](crate::Platform)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Library name placed in the first user agent entry
    #[serde(default = "default_library_name")]
    pub library_name: String,

    /// Library version placed in the first user agent entry
    #[serde(default = "default_version")]
    pub version: String,

    /// Delay before re-detecting a server-side unknown framework, in milliseconds
    #[serde(default = "default_reset_timeout")]
    pub ssr_reset_timeout_ms: u64,

    /// Delay before re-detecting a web unknown framework, in milliseconds
    #[serde(default = "default_reset_timeout")]
    pub web_reset_timeout_ms: u64,

    /// Delay between clearing the cache and priming it again, in milliseconds
    #[serde(default = "default_prime_framework_delay")]
    pub prime_framework_delay_ms: u64,
}

fn default_library_name() -> String {
    BASE_USER_AGENT.to_string()
}

fn default_version() -> String {
    VERSION.to_string()
}

fn default_reset_timeout() -> u64 {
    10
}

fn default_prime_framework_delay() -> u64 {
    1000
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            library_name: default_library_name(),
            version: default_version(),
            ssr_reset_timeout_ms: default_reset_timeout(),
            web_reset_timeout_ms: default_reset_timeout(),
            prime_framework_delay_ms: default_prime_framework_delay(),
        }
    }
}

impl PlatformConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    ///
    /// Empty input yields the defaults. The result is validated.
    pub fn from_json(bytes: &[u8]) -> PlatformResult<Self> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the library name and version
    pub fn with_library(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.library_name = name.into();
        self.version = version.into();
        self
    }

    /// Check that the configuration can produce a well-formed user agent
    pub fn validate(&self) -> PlatformResult<()> {
        if self.library_name.trim().is_empty() {
            return Err(PlatformError::ConfigError(
                "library_name must not be empty".to_string(),
            ));
        }
        if self.library_name.contains(char::is_whitespace) {
            return Err(PlatformError::ConfigError(format!(
                "library_name must not contain whitespace: {:?}",
                self.library_name
            )));
        }
        if self.version.trim().is_empty() {
            return Err(PlatformError::ConfigError(
                "version must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// `"<library-name>/<version>"`
    pub fn user_agent_base(&self) -> String {
        format!("{}/{}", self.library_name, self.version)
    }

    pub fn ssr_reset_timeout(&self) -> Duration {
        Duration::from_millis(self.ssr_reset_timeout_ms)
    }

    pub fn web_reset_timeout(&self) -> Duration {
        Duration::from_millis(self.web_reset_timeout_ms)
    }

    pub fn prime_framework_delay(&self) -> Duration {
        Duration::from_millis(self.prime_framework_delay_ms)
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
