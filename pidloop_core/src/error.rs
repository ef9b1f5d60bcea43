//! Error types shared by the pidloop crates
//!
//! The control cycle itself never fails. Errors only come from the
//! configuration surfaces: parameter files and named tuning.

use thiserror::Error;

/// Pidloop errors
#[derive(Debug, Error)]
pub enum PidError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown tuning parameter '{0}'")]
    UnknownParameter(String),
}

impl PidError {
    /// Shorthand for a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        PidError::Config(msg.into())
    }
}

impl From<serde_json::Error> for PidError {
    fn from(err: serde_json::Error) -> Self {
        PidError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for PidError {
    fn from(err: serde_yaml::Error) -> Self {
        PidError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for PidError {
    fn from(err: toml::de::Error) -> Self {
        PidError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for PidError {
    fn from(err: toml::ser::Error) -> Self {
        PidError::Serialization(err.to_string())
    }
}

/// Result type for pidloop operations
pub type PidResult<T> = Result<T, PidError>;
