//! Carteira Market Data Crate
//!
//! Provider-agnostic quote lookup used to enrich the asset registry with a
//! display name, the latest market price, the daily change and a logo.
//!
//! # Core Types
//!
//! - [`QuoteProvider`] - Trait implemented by every quote source
//! - [`AssetQuote`] - Latest quote snapshot for a ticker
//! - [`MarketDataError`] - Errors raised by providers
//!
//! # Providers
//!
//! - [`provider::brapi::BrapiProvider`] - B3 quotes from `brapi.dev`

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::AssetQuote;
pub use provider::QuoteProvider;
