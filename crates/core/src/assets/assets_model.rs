//! Asset domain models.

use std::fmt;
use std::str::FromStr;

use carteira_market_data::AssetQuote;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// B3 asset class.
///
/// Serialized with the backend's `classe_b3` values (`ACAO`, `FII`, `ETF`,
/// `BDR`). Parsing also accepts the accented and lower-case spellings users
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AssetClass {
    Stock, // Ação
    Reit,  // Fundo imobiliário
    Etf,
    Bdr, // Brazilian depositary receipt
}

impl AssetClass {
    /// Returns the wire representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Stock => "ACAO",
            AssetClass::Reit => "FII",
            AssetClass::Etf => "ETF",
            AssetClass::Bdr => "BDR",
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            AssetClass::Stock => "Ações",
            AssetClass::Reit => "Fundos Imobiliários",
            AssetClass::Etf => "ETFs",
            AssetClass::Bdr => "BDRs",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "ACAO" | "AÇÃO" | "AÇAO" | "ACÃO" | "ACOES" | "AÇÕES" | "STOCK" => Ok(AssetClass::Stock),
            "FII" | "FIIS" | "REIT" => Ok(AssetClass::Reit),
            "ETF" | "ETFS" => Ok(AssetClass::Etf),
            "BDR" | "BDRS" => Ok(AssetClass::Bdr),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown asset class '{}'; expected one of ACAO, FII, ETF, BDR",
                other
            ))
            .into()),
        }
    }
}

impl TryFrom<String> for AssetClass {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AssetClass> for String {
    fn from(class: AssetClass) -> Self {
        class.as_str().to_string()
    }
}

/// Upper-cases and trims a ticker; blank input is rejected.
pub fn normalize_ticker(raw: &str) -> Result<String> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(ValidationError::MissingField("ticker".to_string()).into());
    }
    if ticker.chars().any(char::is_whitespace) {
        return Err(
            ValidationError::InvalidInput(format!("Ticker '{}' contains whitespace", ticker))
                .into(),
        );
    }
    Ok(ticker)
}

/// Domain model representing a registered asset.
///
/// Identity is the ticker. Market fields are filled by quote enrichment and
/// stay `None` while no quote is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub ticker: String,
    pub name: Option<String>,
    pub asset_class: AssetClass,
    pub price: Option<Decimal>,
    pub change_percent: Option<Decimal>,
    pub logo_url: Option<String>,
}

impl Asset {
    pub fn new(ticker: impl Into<String>, asset_class: AssetClass) -> Self {
        Self {
            ticker: ticker.into(),
            name: None,
            asset_class,
            price: None,
            change_percent: None,
            logo_url: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Copies market fields from a quote.
    ///
    /// The name is only replaced when the quote carries one; price, change and
    /// logo always follow the quote so a stale price is never kept.
    pub fn apply_quote(&mut self, quote: &AssetQuote) {
        if let Some(name) = quote.display_name() {
            self.name = Some(name.to_string());
        }
        self.price = quote.price;
        self.change_percent = quote.change_percent;
        self.logo_url = quote.logo_url.clone();
    }

    /// Name for display, falling back to the ticker.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.ticker)
    }
}

/// Input model for registering an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub ticker: String,
    pub asset_class: AssetClass,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
}

impl NewAsset {
    pub fn new(ticker: impl Into<String>, asset_class: AssetClass) -> Self {
        Self {
            ticker: ticker.into(),
            asset_class,
            long_name: None,
            short_name: None,
        }
    }

    /// Normalizes the ticker in place.
    pub fn validate(&mut self) -> Result<()> {
        self.ticker = normalize_ticker(&self.ticker)?;
        Ok(())
    }

    /// Fills the names from a quote, or with the ticker when there is none.
    pub fn with_quote(mut self, quote: Option<&AssetQuote>) -> Self {
        match quote {
            Some(quote) => {
                self.long_name = quote.long_name.clone();
                self.short_name = quote.short_name.clone();
            }
            None => {
                self.long_name = Some(self.ticker.clone());
                self.short_name = Some(self.ticker.clone());
            }
        }
        self
    }

    /// Local registry entry for this asset.
    pub fn to_asset(&self, quote: Option<&AssetQuote>) -> Asset {
        let name = self
            .long_name
            .clone()
            .filter(|name| !name.is_empty())
            .or_else(|| self.short_name.clone().filter(|name| !name.is_empty()));
        let mut asset = Asset {
            ticker: self.ticker.clone(),
            name,
            asset_class: self.asset_class,
            price: None,
            change_percent: None,
            logo_url: None,
        };
        if let Some(quote) = quote {
            asset.apply_quote(quote);
        }
        asset
    }
}

/// Rename and/or reclassify an asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetUpdate {
    pub ticker: Option<String>,
    pub asset_class: Option<AssetClass>,
}

impl AssetUpdate {
    pub fn is_empty(&self) -> bool {
        self.ticker.is_none() && self.asset_class.is_none()
    }

    /// Returns the asset with the update applied.
    pub fn apply_to(&self, asset: &Asset) -> Asset {
        let mut updated = asset.clone();
        if let Some(ticker) = &self.ticker {
            updated.ticker = ticker.clone();
        }
        if let Some(class) = self.asset_class {
            updated.asset_class = class;
        }
        updated
    }
}
