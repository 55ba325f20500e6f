use std::collections::HashMap;
use std::sync::Arc;

use carteira_market_data::{AssetQuote, MarketDataError, QuoteProvider};
use futures::future::join_all;
use log::{debug, error, warn};
use tokio::sync::Mutex;

use super::assets_model::{normalize_ticker, Asset, AssetUpdate, NewAsset};
use super::assets_traits::{AssetRepositoryTrait, AssetServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::events::StoreEvent;
use crate::store::{PortfolioStore, StateUpdate, SyncOutcome};

/// Service for managing the asset registry.
///
/// The registry lives in the [`PortfolioStore`]; the backend is the durable
/// copy. Creation and edits fall back to a local-only change when the backend
/// is unreachable, deletion never does.
pub struct AssetService {
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    quote_provider: Option<Arc<dyn QuoteProvider>>,
    store: Arc<PortfolioStore>,
    keep_data_integrity: bool,
    write_gate: Mutex<()>,
}

impl AssetService {
    /// Creates a new AssetService instance
    pub fn new(
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        quote_provider: Option<Arc<dyn QuoteProvider>>,
        store: Arc<PortfolioStore>,
    ) -> Self {
        Self {
            asset_repository,
            quote_provider,
            store,
            keep_data_integrity: false,
            write_gate: Mutex::new(()),
        }
    }

    /// When set, an asset whose quote cannot be found is not registered.
    pub fn with_keep_data_integrity(mut self, keep_data_integrity: bool) -> Self {
        self.keep_data_integrity = keep_data_integrity;
        self
    }

    async fn lookup_quote(&self, ticker: &str) -> Result<AssetQuote> {
        let provider = self.quote_provider.as_ref().ok_or_else(|| {
            Error::MarketData(MarketDataError::ProviderError {
                provider: "NONE".to_string(),
                message: "no quote provider configured".to_string(),
            })
        })?;
        Ok(provider.latest_quote(ticker).await?)
    }

    async fn fetch_quotes(&self, tickers: Vec<String>) -> HashMap<String, AssetQuote> {
        let Some(provider) = self.quote_provider.as_ref() else {
            debug!("No quote provider configured, skipping enrichment");
            return HashMap::new();
        };

        let lookups = tickers.into_iter().map(|ticker| {
            let provider = Arc::clone(provider);
            async move {
                let quote = provider.latest_quote(&ticker).await;
                (ticker, quote)
            }
        });

        join_all(lookups)
            .await
            .into_iter()
            .filter_map(|(ticker, quote)| match quote {
                Ok(quote) => Some((ticker, quote)),
                Err(e) => {
                    warn!("Could not fetch quote for {}: {}", ticker, e);
                    None
                }
            })
            .collect()
    }

    fn existing(&self, ticker: &str) -> Result<Asset> {
        self.store
            .get_state()
            .find_asset(ticker)
            .cloned()
            .ok_or_else(|| Error::AssetNotFound(ticker.to_string()))
    }
}

#[async_trait::async_trait]
impl AssetServiceTrait for AssetService {
    fn get_assets(&self) -> Vec<Asset> {
        self.store.get_state().assets
    }

    fn get_asset(&self, ticker: &str) -> Result<Asset> {
        self.existing(&normalize_ticker(ticker)?)
    }

    async fn load_assets(&self) -> Result<Vec<Asset>> {
        let assets = self.asset_repository.list().await.map_err(|e| {
            error!("Failed to load assets from the backend: {}", e);
            e
        })?;

        let tickers: Vec<String> = assets.iter().map(|asset| asset.ticker.clone()).collect();
        {
            let _guard = self.write_gate.lock().await;
            let count = assets.len();
            self.store
                .set_state(StateUpdate::assets(assets), StoreEvent::assets_loaded(count));
        }

        let quotes = self.fetch_quotes(tickers).await;
        if quotes.is_empty() {
            return Ok(self.get_assets());
        }

        // Merged into the current registry so edits made during the lookups survive.
        let _guard = self.write_gate.lock().await;
        let mut enriched = self.store.get_state().assets;
        for asset in enriched.iter_mut() {
            if let Some(quote) = quotes.get(&asset.ticker) {
                asset.apply_quote(quote);
            }
        }
        debug!("Enriched {} of {} assets with quotes", quotes.len(), enriched.len());

        let count = enriched.len();
        self.store.set_state(
            StateUpdate::assets(enriched.clone()),
            StoreEvent::assets_loaded(count),
        );
        Ok(enriched)
    }

    async fn create_asset(&self, mut new_asset: NewAsset) -> Result<SyncOutcome<Asset>> {
        new_asset.validate()?;
        let ticker = new_asset.ticker.clone();

        let _guard = self.write_gate.lock().await;
        if self.store.get_state().find_asset(&ticker).is_some() {
            return Err(ValidationError::DuplicateTicker(ticker).into());
        }

        let quote = match self.lookup_quote(&ticker).await {
            Ok(quote) => Some(quote),
            Err(e) if self.keep_data_integrity => {
                warn!("Rejecting {}: quote lookup failed with data integrity on: {}", ticker, e);
                return Err(e);
            }
            Err(e) => {
                warn!("Quote lookup failed for {}, registering without market data: {}", ticker, e);
                None
            }
        };

        let new_asset = new_asset.with_quote(quote.as_ref());
        let outcome = match self.asset_repository.create(&new_asset).await {
            Ok(mut created) => {
                if let Some(quote) = quote.as_ref() {
                    created.apply_quote(quote);
                }
                SyncOutcome::persisted(created)
            }
            Err(e) if e.is_recoverable() => {
                warn!("Backend rejected asset {}, adding it locally only: {}", ticker, e);
                SyncOutcome::local_only(
                    new_asset.to_asset(quote.as_ref()),
                    format!("{} was added locally only: {}", ticker, e),
                )
            }
            Err(e) => return Err(e),
        };

        let mut assets = self.store.get_state().assets;
        assets.push(outcome.value.clone());
        self.store.set_state(
            StateUpdate::assets(assets),
            StoreEvent::assets_changed(vec![ticker]),
        );

        Ok(outcome)
    }

    async fn update_asset(&self, ticker: &str, update: AssetUpdate) -> Result<SyncOutcome<Asset>> {
        let ticker = normalize_ticker(ticker)?;
        let update = AssetUpdate {
            ticker: update.ticker.as_deref().map(normalize_ticker).transpose()?,
            asset_class: update.asset_class,
        };

        let _guard = self.write_gate.lock().await;
        let state = self.store.get_state();
        let existing = state
            .find_asset(&ticker)
            .cloned()
            .ok_or_else(|| Error::AssetNotFound(ticker.clone()))?;

        if let Some(new_ticker) = update.ticker.as_deref() {
            if new_ticker != ticker && state.find_asset(new_ticker).is_some() {
                return Err(ValidationError::DuplicateTicker(new_ticker.to_string()).into());
            }
        }

        if update.is_empty() {
            return Ok(SyncOutcome::persisted(existing));
        }

        let updated = update.apply_to(&existing);
        let outcome = match self.asset_repository.update(&ticker, &update).await {
            Ok(remote) => {
                let mut asset = updated;
                if remote.name.is_some() {
                    asset.name = remote.name;
                }
                SyncOutcome::persisted(asset)
            }
            Err(e) if e.is_recoverable() => {
                warn!("Backend rejected update of {}, applying locally only: {}", ticker, e);
                SyncOutcome::local_only(updated, format!("{} was updated locally only: {}", ticker, e))
            }
            Err(e) => return Err(e),
        };

        let assets: Vec<Asset> = state
            .assets
            .into_iter()
            .map(|asset| {
                if asset.ticker == ticker {
                    outcome.value.clone()
                } else {
                    asset
                }
            })
            .collect();

        let mut changed = vec![ticker];
        if outcome.value.ticker != changed[0] {
            changed.push(outcome.value.ticker.clone());
        }
        self.store
            .set_state(StateUpdate::assets(assets), StoreEvent::assets_changed(changed));

        Ok(outcome)
    }

    async fn delete_asset(&self, ticker: &str) -> Result<()> {
        let ticker = normalize_ticker(ticker)?;

        let _guard = self.write_gate.lock().await;
        self.existing(&ticker)?;

        self.asset_repository.delete(&ticker).await.map_err(|e| {
            error!("Failed to delete asset {}: {}", ticker, e);
            e
        })?;

        let mut assets = self.store.get_state().assets;
        assets.retain(|asset| asset.ticker != ticker);
        self.store.set_state(
            StateUpdate::assets(assets),
            StoreEvent::assets_changed(vec![ticker]),
        );
        Ok(())
    }
}
