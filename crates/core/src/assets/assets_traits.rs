use std::collections::HashMap;

use super::assets_model::{Asset, AssetUpdate, NewAsset};
use crate::errors::Result;
use crate::store::SyncOutcome;

/// Read-only asset metadata as seen by the accounting side.
pub trait AssetLookup {
    fn asset(&self, ticker: &str) -> Option<&Asset>;

    /// Latest known market price, if any.
    fn price(&self, ticker: &str) -> Option<rust_decimal::Decimal> {
        self.asset(ticker).and_then(|asset| asset.price)
    }
}

impl AssetLookup for HashMap<String, Asset> {
    fn asset(&self, ticker: &str) -> Option<&Asset> {
        self.get(ticker)
    }
}

impl AssetLookup for [Asset] {
    fn asset(&self, ticker: &str) -> Option<&Asset> {
        self.iter().find(|asset| asset.ticker == ticker)
    }
}

impl AssetLookup for Vec<Asset> {
    fn asset(&self, ticker: &str) -> Option<&Asset> {
        self.as_slice().asset(ticker)
    }
}

/// Trait defining the contract for Asset service operations.
#[async_trait::async_trait]
pub trait AssetServiceTrait: Send + Sync {
    /// Current registry from the store.
    fn get_assets(&self) -> Vec<Asset>;
    fn get_asset(&self, ticker: &str) -> Result<Asset>;
    /// Loads the registry from the backend, publishes it, then enriches it with quotes.
    async fn load_assets(&self) -> Result<Vec<Asset>>;
    async fn create_asset(&self, new_asset: NewAsset) -> Result<SyncOutcome<Asset>>;
    async fn update_asset(&self, ticker: &str, update: AssetUpdate) -> Result<SyncOutcome<Asset>>;
    /// Deletes remotely first; the local registry only changes on success.
    async fn delete_asset(&self, ticker: &str) -> Result<()>;
}

/// Trait defining the contract for Asset repository operations.
#[async_trait::async_trait]
pub trait AssetRepositoryTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Asset>>;
    async fn create(&self, new_asset: &NewAsset) -> Result<Asset>;
    async fn update(&self, ticker: &str, update: &AssetUpdate) -> Result<Asset>;
    async fn delete(&self, ticker: &str) -> Result<()>;
}
