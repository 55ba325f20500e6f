//! REST storage implementation for Carteira.
//!
//! This crate talks to the backend API over HTTP. It implements the repository
//! traits defined in `carteira-core` and contains:
//! - The shared API client (base URL, timeout, status handling)
//! - Wire models for the `/ativos` and `/movimentacoes` endpoints
//! - Repository implementations for assets and the position ledger
//!
//! # Architecture
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-http (this crate)
//!              │
//!              ▼
//!         backend API
//! ```

pub mod client;
pub mod errors;

// Repository implementations
pub mod assets;
pub mod portfolio;

pub use client::ApiClient;

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use assets::HttpAssetRepository;
pub use portfolio::HttpPortfolioRepository;

// Re-export from carteira-core for convenience
pub use carteira_core::errors::{Error, PersistenceError, Result};
