//! Error types for the agent.
//!
//! The policy itself never fails: every branch is total over a well-formed
//! snapshot. Errors only come from loading configuration and building the
//! static environment.

use thiserror::Error;

/// Result type alias using [`AgentError`].
pub type Result<T> = std::result::Result<T, AgentError>;

/// Top-level error type for the agent.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Config file does not exist.
    #[error("Policy config not found: {0}")]
    ConfigNotFound(String),

    /// Failed to read the config file.
    #[error("Failed to read policy config: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// Failed to parse RON.
    #[error("Failed to parse policy config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    /// Config parsed but holds values the policy cannot run with.
    #[error("Invalid policy config: {0}")]
    InvalidConfig(String),

    /// Map dimensions, obstacle grid or spawn point are inconsistent.
    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),
}
