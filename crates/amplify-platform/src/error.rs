//! Error types for platform configuration

use thiserror::Error;

/// Result type alias for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Error type for platform operations
///
/// User agent assembly never fails; these errors only surface while loading
/// or validating a [`PlatformConfig`](crate::PlatformConfig).
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl PlatformError {
    /// Returns a stable numeric code for the error
    pub fn error_code(&self) -> u32 {
        match self {
            PlatformError::ConfigError(_) => 1,
            PlatformError::SerializationError(_) => 2,
        }
    }
}

impl From<serde_json::Error> for PlatformError {
    fn from(err: serde_json::Error) -> Self {
        PlatformError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
