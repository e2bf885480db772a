//! RMD-X8 codec error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RmdError {
    #[error("Unsupported feedback type: {0}")]
    UnsupportedFeedbackType(u8),

    #[error("Invalid frame length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl RmdError {
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}

pub type RmdResult<T> = Result<T, RmdError>;
