//! Core error types for the Carteira application.
//!
//! This module defines transport-agnostic error types. Storage-specific errors
//! (HTTP status codes, decoding failures) are converted to these types by the
//! storage layer.

use carteira_market_data::MarketDataError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Insufficient position for {ticker}: requested {requested}, held {held}")]
    InsufficientPosition {
        ticker: String,
        requested: Decimal,
        held: Decimal,
    },

    #[error("Persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Persistence failures are recovered by applying the change locally;
    /// every other error aborts the operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Persistence(_))
    }
}

/// Errors raised while talking to the remote store.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The remote store could not be reached (connection refused, timeout).
    #[error("Remote store unreachable: {0}")]
    Unreachable(String),

    /// The remote store answered with a non-2xx status.
    #[error("Remote store answered {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Failed to decode remote response: {0}")]
    Decode(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Field '{field}' must be greater than zero, got {value}")]
    NonPositive { field: String, value: Decimal },

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Ticker '{0}' is already registered")]
    DuplicateTicker(String),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Persistence(PersistenceError::Decode(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
