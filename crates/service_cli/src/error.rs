//! CLI error types.

use crate::config::ConfigError;
use index_core::types::{ConfigurationError, DomainError, NotFoundError};
use index_scenarios::ScenarioError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file or environment problem
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed baseline registry
    #[error("Invalid baseline: {0}")]
    Baseline(#[from] ConfigurationError),

    /// Scenario evaluation failed
    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Table formatting error
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        Self::Scenario(err.into())
    }
}

impl From<NotFoundError> for CliError {
    fn from(err: NotFoundError) -> Self {
        Self::Scenario(err.into())
    }
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// CLI result type
pub type Result<T> = std::result::Result<T, CliError>;
