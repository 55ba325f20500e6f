//! Assets module - domain models, services, and traits.

mod assets_model;
mod assets_service;
mod assets_traits;

#[cfg(test)]
mod assets_model_tests;


// Re-export the public interface
pub use assets_model::{normalize_ticker, Asset, AssetClass, AssetUpdate, NewAsset};
pub use assets_service::AssetService;
pub use assets_traits::{AssetLookup, AssetRepositoryTrait, AssetServiceTrait};
