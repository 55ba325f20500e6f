//! Carteira Core - Domain entities, services, and traits.
//!
//! This crate contains the portfolio accounting engine and everything that
//! keeps its results consistent: the position ledger, the reconciliation
//! service that persists or falls back locally, the summary computations and
//! the store observers subscribe to. It is transport-agnostic and defines
//! traits that are implemented by the `storage-http` crate.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod events;
pub mod portfolio;
pub mod store;
pub mod utils;

// Re-export common types from asset and portfolio modules
pub use assets::*;
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
