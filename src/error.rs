//! Error types for the timeline scraper
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Two failure modes of the extraction pipeline never show up here: a
//! structurally malformed markup fragment ends a run cleanly, and an item
//! missing a required sub-node is skipped. Both are only logged.

use thiserror::Error;

/// The main error type for the timeline scraper
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Remote Resource Errors
    // ============================================================================
    #[error("Profile unavailable: {target}")]
    ProfileUnavailable { target: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a profile unavailable error
    pub fn profile_unavailable(target: impl Into<String>) -> Self {
        Self::ProfileUnavailable {
            target: target.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Check if this error came from the network layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Timeout { .. })
    }

    /// Check if this error reports a missing remote resource
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::ProfileUnavailable { .. })
    }
}

/// Result type alias for the timeline scraper
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::profile_unavailable("nobody");
        assert_eq!(err.to_string(), "Profile unavailable: nobody");

        let err = Error::decode("no markup");
        assert_eq!(err.to_string(), "Failed to decode response: no markup");

        let err = Error::invalid_value("pages", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'pages': must be at least 1"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::profile_unavailable("x").is_unavailable());
        assert!(!Error::profile_unavailable("x").is_transport());

        assert!(Error::Timeout { timeout_ms: 1000 }.is_transport());
        assert!(!Error::decode("bad").is_transport());
        assert!(!Error::invalid_value("pages", "zero").is_unavailable());
    }
}
