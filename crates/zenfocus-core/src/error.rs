//! Core error types for zenfocus-core.
//!
//! Persistence failures are never surfaced by the gamification engine's
//! public operations; they are logged and handed to an optional hook.
//! Configuration errors propagate normally.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for zenfocus-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Profile persistence errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// The persisted document exists but could not be read or parsed.
    #[error("Failed to read profile from {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// The profile could not be written to its destination.
    #[error("Failed to write profile to {path}: {message}")]
    Write { path: PathBuf, message: String },
}

impl PersistError {
    pub(crate) fn read(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        PersistError::Read {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        PersistError::Write {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Location the failed operation targeted.
    pub fn path(&self) -> &PathBuf {
        match self {
            PersistError::Read { path, .. } | PersistError::Write { path, .. } => path,
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Home/config directory could not be prepared
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persist_error_reports_path() {
        let err = PersistError::write("/tmp/profile.json", "disk full");
        assert_eq!(err.path(), &PathBuf::from("/tmp/profile.json"));
        assert_eq!(
            err.to_string(),
            "Failed to write profile to /tmp/profile.json: disk full"
        );
    }

    #[test]
    fn core_error_wraps_config_error() {
        let err: CoreError = ConfigError::UnknownKey("timer.nope".into()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown config key: timer.nope"
        );
    }
}
