use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest quote snapshot for a ticker.
///
/// Every market field is optional: providers routinely omit the price for
/// suspended tickers, and the registry must still be usable without it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetQuote {
    pub ticker: String,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    /// Last traded price
    pub price: Option<Decimal>,
    /// Daily change in percent (e.g. `1.25` for +1.25%)
    pub change_percent: Option<Decimal>,
    pub logo_url: Option<String>,
    /// Source of the quote (BRAPI, MANUAL, ...)
    pub source: String,
    pub fetched_at: DateTime<Utc>,
}

impl AssetQuote {
    /// Creates a quote carrying only the ticker.
    pub fn empty(ticker: &str, source: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            long_name: None,
            short_name: None,
            price: None,
            change_percent: None,
            logo_url: None,
            source: source.to_string(),
            fetched_at: Utc::now(),
        }
    }

    /// Preferred display name: the long name, falling back to the short one.
    pub fn display_name(&self) -> Option<&str> {
        self.long_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.short_name.as_deref().filter(|n| !n.is_empty()))
    }
}
