//! Error types for the System Health Agent

use system_health_core::HealthError;
use thiserror::Error;

/// Main error type for agent operations
#[derive(Error, Debug)]
pub enum AgentError {
    /// Invalid settings or arguments
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Rendering the health tree failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A probe handed back an invalid health node
    #[error("Health error: {0}")]
    Health(#[from] HealthError),

    /// HTTP server failure
    #[error("Server error: {0}")]
    Server(String),

    /// Two probes registered under the same component name
    #[error("Duplicate component name '{0}'")]
    DuplicateComponent(String),
}

impl AgentError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        AgentError::Config(msg.into())
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        matches!(self, AgentError::Config(_))
    }
}

impl From<std::io::Error> for AgentError {
    fn from(err: std::io::Error) -> Self {
        AgentError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for AgentError {
    fn from(err: serde_yaml::Error) -> Self {
        AgentError::Serialization(format!("YAML error: {}", err))
    }
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;
