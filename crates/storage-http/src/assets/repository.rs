use std::sync::Arc;

use async_trait::async_trait;
use carteira_core::assets::{Asset, AssetRepositoryTrait, AssetUpdate, NewAsset};
use carteira_core::errors::Result;
use tracing::debug;

use super::model::{AssetDTO, AssetForm, AssetUpdateForm, AtivosResponse};
use crate::client::ApiClient;
use crate::errors::IntoCore;

const ASSETS_PATH: &str = "/ativos";

/// Asset registry backed by the REST API.
pub struct HttpAssetRepository {
    client: Arc<ApiClient>,
}

impl HttpAssetRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssetRepositoryTrait for HttpAssetRepository {
    async fn list(&self) -> Result<Vec<Asset>> {
        let response: AtivosResponse = self.client.get_json(ASSETS_PATH).await.into_core()?;
        let assets = response.into_assets();
        debug!("Fetched {} assets", assets.len());
        Ok(assets)
    }

    async fn create(&self, new_asset: &NewAsset) -> Result<Asset> {
        let form = AssetForm::from(new_asset);
        let created: AssetDTO = self
            .client
            .post_form(ASSETS_PATH, &form)
            .await
            .into_core()?;
        created.into_asset()
    }

    async fn update(&self, ticker: &str, update: &AssetUpdate) -> Result<Asset> {
        let form = AssetUpdateForm::from(update);
        let updated: AssetDTO = self
            .client
            .patch_form(ASSETS_PATH, &[("ticker", ticker)], &form)
            .await
            .into_core()?;
        updated.into_asset()
    }

    async fn delete(&self, ticker: &str) -> Result<()> {
        self.client
            .delete(ASSETS_PATH, &[("ticker", ticker)])
            .await
            .into_core()
    }
}
