//! Outlier detection error types.

use thiserror::Error;

/// Outlier detection errors.
#[derive(Debug, Error)]
pub enum OutlierError {
    #[error("Detector not fitted: call fit() before transform()")]
    NotFitted,

    #[error("Invalid configuration: {name} - {reason}")]
    InvalidConfiguration { name: String, reason: String },

    #[error("Insufficient data: required {required}, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl OutlierError {
    /// Shorthand for an [`OutlierError::InvalidConfiguration`].
    pub fn invalid_config(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for outlier detection operations.
pub type Result<T> = std::result::Result<T, OutlierError>;
