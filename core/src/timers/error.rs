//! Error types for timer operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors during timer construction and definition loading
#[derive(Debug, Error)]
pub enum TimerError {
    /// Construction was attempted without any configuration record.
    /// The host is expected to end its session when it sees this.
    #[error("timer constructed without a configuration record")]
    ConfigurationMissing,

    #[error("timer '{name}' has no action")]
    MissingAction { name: String },

    #[error("failed to read timer file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse timer TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid timer definition in {path}: {reason}")]
    InvalidDefinition { path: PathBuf, reason: String },
}

impl TimerError {
    /// Whether the host should terminate its session on this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, TimerError::ConfigurationMissing)
    }
}
