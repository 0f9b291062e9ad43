//! Error types for the health engine
//!
//! Construction of a [`crate::Health`] node is the only operation that can
//! fail validation; aggregation never fails.

use thiserror::Error;

/// Main error type for health operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HealthError {
    /// A DOWN node was built without a (non-empty) reason
    #[error("Health DOWN must have a reason")]
    DownWithoutReason,

    /// An UP node was built with a reason
    #[error("Health UP must not have reason")]
    UpWithReason,

    /// Rendering or parsing the structural form failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HealthError {
    /// Check if this is one of the two status/reason invariant violations
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            HealthError::DownWithoutReason | HealthError::UpWithReason
        )
    }
}

impl From<serde_json::Error> for HealthError {
    fn from(err: serde_json::Error) -> Self {
        HealthError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for HealthError {
    fn from(err: serde_yaml::Error) -> Self {
        HealthError::Serialization(format!("YAML error: {}", err))
    }
}

/// Result type alias for health operations
pub type Result<T> = std::result::Result<T, HealthError>;
