//! amplify-platform - Platform descriptor and user agent assembly
//!
//! This crate describes the running library to the services it calls:
//! - [`Platform`] descriptor with the user agent base and live framework
//! - [`UserAgent`] assembly and rendering for outbound calls
//! - [`FrameworkDetection`] caching detector with change observers
//! - [`CustomUserAgentRegistry`] for per-API extra entries
//!
//! ```
//! use amplify_platform::{Framework, Platform, UserAgentDetails};
//! use std::sync::Arc;
//!
//! let platform = Platform::default().with_detector(Arc::new(Framework::React));
//! let details = UserAgentDetails::for_action("Storage", "upload");
//!
//! assert_eq!(
//!     platform.user_agent_string(Some(&details)),
//!     "aws-amplify/6.0.0 Storage/upload framework/React"
//! );
//! ```

mod config;
mod custom;
mod detection;
mod error;
mod framework;
mod platform;
mod user_agent;

pub use config::{BASE_USER_AGENT, PlatformConfig, VERSION};
pub use custom::{
    CustomUserAgentHandle, CustomUserAgentRegistry, CustomUserAgentSource, NoCustomUserAgent,
    SetCustomUserAgentInput,
};
pub use detection::{
    EnvFrameworkDetector, EnvLookup, FRAMEWORK_ENV_VAR, FrameworkDetection, FrameworkDetector,
    FrameworkObserver, Probe, ProbeDetector, RetryTimings,
};
pub use error::{PlatformError, PlatformResult};
pub use framework::{Category, Framework};
#[doc(hidden)]
pub use platform::{INTERNAL_USER_AGENT_OVERRIDE, InternalUserAgentOverride};
pub use platform::{
    Platform, build_user_agent_object, build_user_agent_string, init_platform, platform,
    set_custom_user_agent,
};
pub use user_agent::{FRAMEWORK_KEY, UserAgent, UserAgentDetails, UserAgentEntry};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Category, CustomUserAgentSource, Framework, FrameworkDetector, Platform, PlatformConfig,
        PlatformError, PlatformResult, SetCustomUserAgentInput, UserAgent, UserAgentDetails,
        UserAgentEntry, build_user_agent_object, build_user_agent_string,
    };
}
