//! Storage-specific error types for backend API calls.
//!
//! This module provides error types that wrap `reqwest` failures and convert
//! them to the transport-agnostic error types defined in `carteira_core`.

use carteira_core::errors::{Error, PersistenceError};
use thiserror::Error;

/// Storage-specific errors.
///
/// These errors are internal to the storage layer and are converted to
/// `carteira_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Decode(err.to_string())
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Transport(e) if e.is_decode() => {
                Error::Persistence(PersistenceError::Decode(e.to_string()))
            }
            StorageError::Transport(e) => {
                Error::Persistence(PersistenceError::Unreachable(e.to_string()))
            }
            StorageError::Status { status, message } => {
                Error::Persistence(PersistenceError::Status { status, message })
            }
            StorageError::Decode(e) => Error::Persistence(PersistenceError::Decode(e)),
            StorageError::InvalidConfig(e) => Error::Unexpected(e),
        }
    }
}

/// Extension trait for converting storage Results to core Results.
pub trait IntoCore<T> {
    fn into_core(self) -> carteira_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, StorageError> {
    fn into_core(self) -> carteira_core::Result<T> {
        self.map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_persistence() {
        let err: Error = StorageError::Status {
            status: 503,
            message: "unavailable".to_string(),
        }
        .into();
        assert!(err.is_recoverable());
        assert!(matches!(
            err,
            Error::Persistence(PersistenceError::Status { status: 503, .. })
        ));
    }

    #[test]
    fn test_decode_maps_to_persistence() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = StorageError::from(parse_err).into();
        assert!(matches!(err, Error::Persistence(PersistenceError::Decode(_))));
    }
}
