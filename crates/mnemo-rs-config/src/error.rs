//! Error types for config loading and validation.

use crate::ValidationFailure;
use thiserror::Error;

/// Errors returned while loading or validating config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a config file failed.
    #[error("failed to read config: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Parsing a config file failed.
    #[error("failed to parse config: {0}")]
    ParseFailed(#[from] json5::Error),
    /// Converting JSON values failed.
    #[error("failed to decode config: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    /// The document did not match the schema.
    #[error("invalid config ({label}):\n{failure}")]
    Invalid {
        label: String,
        failure: ValidationFailure,
    },
}

impl ConfigError {
    /// Validation diagnostics, if this error carries any.
    pub fn validation_failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Invalid { failure, .. } => Some(failure),
            _ => None,
        }
    }
}
