//! Record store error types.

use thiserror::Error;
use tillbook_shared::AppError;

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required file is missing.
    #[error("not found: {key}")]
    NotFound {
        /// Store key that was not found.
        key: String,
    },

    /// A file exists but is not the expected JSON.
    #[error("cannot decode {key}: {message}")]
    Decode {
        /// Store key of the file.
        key: String,
        /// Decoder message.
        message: String,
    },

    /// Provider configuration error.
    #[error("store configuration error: {0}")]
    Configuration(String),

    /// OpenDAL operation error.
    #[error("store operation failed: {0}")]
    Operation(String),
}

impl StoreError {
    /// Create a decode error.
    #[must_use]
    pub fn decode(key: impl Into<String>, err: &serde_json::Error) -> Self {
        Self::Decode {
            key: key.into(),
            message: err.to_string(),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<opendal::Error> for StoreError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: err.to_string(),
            },
            opendal::ErrorKind::ConfigInvalid => Self::Configuration(err.to_string()),
            _ => Self::Operation(err.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::Configuration(_) => Self::Config(err.to_string()),
            StoreError::Decode { .. } | StoreError::Operation(_) => Self::Store(err.to_string()),
        }
    }
}
