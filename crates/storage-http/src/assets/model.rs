//! Wire models for `/ativos`.

use carteira_core::assets::{Asset, AssetClass, AssetUpdate, NewAsset};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Body of `GET /ativos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AtivosResponse {
    #[serde(default)]
    pub ativos: Option<Vec<AssetDTO>>,
}

impl AtivosResponse {
    /// Registry rows as domain assets. Rows with an unknown `classe_b3` are
    /// skipped.
    pub fn into_assets(self) -> Vec<Asset> {
        self.ativos
            .unwrap_or_default()
            .into_iter()
            .filter_map(|dto| {
                let ticker = dto.ticker.clone();
                dto.into_asset()
                    .map_err(|e| warn!("Skipping asset {}: {}", ticker, e))
                    .ok()
            })
            .collect()
    }
}

/// An asset as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDTO {
    pub ticker: String,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    pub classe_b3: String,
}

impl AssetDTO {
    pub fn into_asset(self) -> carteira_core::Result<Asset> {
        let asset_class: AssetClass = self.classe_b3.parse()?;
        let name = self
            .long_name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.short_name.filter(|n| !n.trim().is_empty()));

        let mut asset = Asset::new(self.ticker.trim().to_uppercase(), asset_class);
        asset.name = name;
        Ok(asset)
    }
}

/// Form body of `POST /ativos`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetForm {
    pub ticker: String,
    pub long_name: String,
    pub short_name: String,
    pub classe_b3: String,
}

impl From<&NewAsset> for AssetForm {
    fn from(new_asset: &NewAsset) -> Self {
        Self {
            ticker: new_asset.ticker.clone(),
            long_name: new_asset.long_name.clone().unwrap_or_default(),
            short_name: new_asset.short_name.clone().unwrap_or_default(),
            classe_b3: new_asset.asset_class.as_str().to_string(),
        }
    }
}

/// Form body of `PATCH /ativos?ticker=X`. Only changed fields are sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetUpdateForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classe_b3: Option<String>,
}

impl From<&AssetUpdate> for AssetUpdateForm {
    fn from(update: &AssetUpdate) -> Self {
        Self {
            ticker: update.ticker.clone(),
            classe_b3: update.asset_class.map(|c| c.as_str().to_string()),
        }
    }
}
