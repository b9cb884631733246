//! Process-wide platform descriptor

use crate::{
    CustomUserAgentHandle, CustomUserAgentRegistry, CustomUserAgentSource,
    EnvFrameworkDetector, Framework, FrameworkDetection, FrameworkDetector, PlatformConfig,
    PlatformError, PlatformResult, RetryTimings, SetCustomUserAgentInput, UserAgent,
    UserAgentDetails,
};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

/// Global platform instance
static PLATFORM: OnceCell<Platform> = OnceCell::new();

/// Describes the running library and its host framework
///
/// The configuration is fixed at construction. The framework is read from
/// the detector on every access and never cached here; any caching belongs
/// to the detector (see [`FrameworkDetection`]).
pub struct Platform {
    config: PlatformConfig,
    user_agent_base: String,
    detector: Arc<dyn FrameworkDetector>,
    custom: Arc<dyn CustomUserAgentSource>,
    registry: CustomUserAgentRegistry,
    registry_consulted: bool,
}

impl Platform {
    /// Create a platform with the default detector and registry
    pub fn new(config: PlatformConfig) -> PlatformResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: PlatformConfig) -> Self {
        let detection = FrameworkDetection::with_timings(
            EnvFrameworkDetector::default(),
            RetryTimings::from(&config),
        );
        let registry = CustomUserAgentRegistry::new();
        Self {
            user_agent_base: config.user_agent_base(),
            config,
            detector: Arc::new(detection),
            custom: Arc::new(registry.clone()),
            registry,
            registry_consulted: true,
        }
    }

    /// Replace the framework detector
    pub fn with_detector(mut self, detector: Arc<dyn FrameworkDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Replace the custom entry lookup
    ///
    /// Entries registered through [`set_custom_user_agent`](Self::set_custom_user_agent)
    /// are no longer consulted afterwards.
    pub fn with_custom_source(mut self, custom: Arc<dyn CustomUserAgentSource>) -> Self {
        self.custom = custom;
        self.registry_consulted = false;
        self
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// `"<library-name>/<version>"`
    pub fn user_agent_base(&self) -> &str {
        &self.user_agent_base
    }

    /// Current framework, freshly read from the detector
    pub fn framework(&self) -> Framework {
        self.detector.detect()
    }

    pub fn is_react_native(&self) -> bool {
        self.framework().is_react_native()
    }

    /// Register a callback fired when the detected framework changes
    pub fn observe_framework_changes<F>(&self, observer: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.detector.observe_changes(Arc::new(observer));
    }

    /// Ordered user agent entries for a call
    pub fn user_agent_object(&self, details: Option<&UserAgentDetails>) -> UserAgent {
        UserAgent::assemble(
            &self.config,
            self.detector.as_ref(),
            self.custom.as_ref(),
            details,
        )
    }

    /// Rendered user agent for a call
    pub fn user_agent_string(&self, details: Option<&UserAgentDetails>) -> String {
        self.user_agent_object(details).to_string()
    }

    /// Whether registered custom entries reach the user agent
    pub fn uses_custom_registry(&self) -> bool {
        self.registry_consulted
    }

    pub fn custom_user_agents(&self) -> &CustomUserAgentRegistry {
        &self.registry
    }

    /// Attach extra entries to the given APIs of a category
    ///
    /// After [`with_custom_source`](Self::with_custom_source) the entries are
    /// stored but not used for assembly.
    pub fn set_custom_user_agent(&self, input: SetCustomUserAgentInput) -> CustomUserAgentHandle {
        if !self.registry_consulted {
            debug!(
                category = %input.category,
                "custom user agent registered on a platform with a replaced custom source"
            );
        }
        self.registry.set(input)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::from_config(PlatformConfig::default())
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform")
            .field("user_agent_base", &self.user_agent_base)
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("registry_consulted", &self.registry_consulted)
            .finish_non_exhaustive()
    }
}

/// Install the global platform
///
/// Must run before the first call to [`platform`]; afterwards the global
/// instance is fixed.
pub fn init_platform(platform: Platform) -> PlatformResult<&'static Platform> {
    let mut installed = false;
    let global = PLATFORM.get_or_init(|| {
        installed = true;
        platform
    });
    if installed {
        Ok(global)
    } else {
        Err(PlatformError::ConfigError(
            "global platform already initialized".to_string(),
        ))
    }
}

/// Get the global platform, creating the default one on first use
pub fn platform() -> &'static Platform {
    PLATFORM.get_or_init(Platform::default)
}

/// Build user agent entries with the global platform
pub fn build_user_agent_object(details: Option<&UserAgentDetails>) -> UserAgent {
    platform().user_agent_object(details)
}

/// Build a user agent string with the global platform
pub fn build_user_agent_string(details: Option<&UserAgentDetails>) -> String {
    platform().user_agent_string(details)
}

/// Register custom entries on the global platform
pub fn set_custom_user_agent(input: SetCustomUserAgentInput) -> CustomUserAgentHandle {
    platform().set_custom_user_agent(input)
}

/// Marker for internal user agent overrides.
///
/// Reserved for use inside the library. It cannot be constructed outside
/// this crate and may change or disappear without notice.
#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InternalUserAgentOverride(());

#[doc(hidden)]
pub const INTERNAL_USER_AGENT_OVERRIDE: InternalUserAgentOverride = InternalUserAgentOverride(());
