//! Brapi market data provider implementation.
//!
//! Quotes for B3-listed tickers (stocks, FIIs, ETFs, BDRs) via the
//! `/api/quote/{ticker}` endpoint.
//! API documentation: https://brapi.dev/docs

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Number;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::AssetQuote;
use crate::provider::QuoteProvider;

pub const DEFAULT_BASE_URL: &str = "https://brapi.dev";
const PROVIDER_ID: &str = "BRAPI";

/// Placeholder logo Brapi returns for tickers without a logo of their own.
const GENERIC_LOGO_URL: &str = "https://icons.brapi.dev/icons/BRAPI.svg";

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /api/quote/{ticker}
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    results: Vec<QuoteResult>,
    /// Present when the request failed (e.g. unknown ticker)
    error: Option<ErrorField>,
    message: Option<String>,
}

/// Brapi sends `error` either as a boolean flag or as a message.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Flag(bool),
    Message(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResult {
    symbol: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    regular_market_price: Option<Number>,
    regular_market_change_percent: Option<Number>,
    logourl: Option<String>,
}

// ============================================================================
// BrapiProvider
// ============================================================================

/// Brapi quote provider.
pub struct BrapiProvider {
    client: Client,
    token: String,
    base_url: String,
}

impl BrapiProvider {
    /// Create a new Brapi provider with the given API token.
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL.to_string(), Duration::from_secs(30))
    }

    /// Create a provider pointing at a custom base URL (proxies, tests).
    pub fn with_base_url(token: String, base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, ticker: &str) -> Result<String, MarketDataError> {
        let url = format!("{}/api/quote/{}", self.base_url, ticker);
        debug!("Brapi request: {}", ticker);

        let response = self
            .client
            .get(&url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: format!("Request failed: {}", e),
                    }
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::SymbolNotFound(ticker.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }

    fn parse_quote(&self, ticker: &str, body: &str) -> Result<AssetQuote, MarketDataError> {
        let response: QuoteResponse =
            serde_json::from_str(body).map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse quote response: {}", e),
            })?;

        match response.error {
            Some(ErrorField::Flag(true)) => {
                let message = response
                    .message
                    .unwrap_or_else(|| format!("Ticker \"{}\" not found", ticker));
                warn!("Brapi rejected {}: {}", ticker, message);
                return Err(MarketDataError::SymbolNotFound(ticker.to_string()));
            }
            Some(ErrorField::Message(message)) => {
                warn!("Brapi rejected {}: {}", ticker, message);
                return Err(MarketDataError::SymbolNotFound(ticker.to_string()));
            }
            _ => {}
        }

        let result = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::SymbolNotFound(ticker.to_string()))?;

        Ok(AssetQuote {
            ticker: result.symbol.unwrap_or_else(|| ticker.to_string()),
            long_name: result.long_name.as_deref().and_then(sanitize_name),
            short_name: result.short_name.as_deref().and_then(sanitize_name),
            price: result.regular_market_price.as_ref().and_then(number_to_decimal),
            change_percent: result
                .regular_market_change_percent
                .as_ref()
                .and_then(number_to_decimal),
            logo_url: result
                .logourl
                .filter(|url| !url.is_empty() && url != GENERIC_LOGO_URL),
            source: PROVIDER_ID.to_string(),
            fetched_at: Utc::now(),
        })
    }
}

#[async_trait]
impl QuoteProvider for BrapiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn latest_quote(&self, ticker: &str) -> Result<AssetQuote, MarketDataError> {
        let body = self.fetch(ticker).await?;
        self.parse_quote(ticker, &body)
    }
}

/// Trims a company name and collapses runs of inner whitespace.
fn sanitize_name(raw: &str) -> Option<String> {
    let cleaned = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn number_to_decimal(number: &Number) -> Option<Decimal> {
    let raw = number.to_string();
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn provider() -> BrapiProvider {
        BrapiProvider::new("token".to_string())
    }

    #[test]
    fn test_parse_quote_maps_fields() {
        let body = r#"{
            "results": [{
                "symbol": "PETR4",
                "longName": "  Petróleo   Brasileiro S.A.  ",
                "shortName": "PETROBRAS PN",
                "regularMarketPrice": 38.5,
                "regularMarketChangePercent": -1.25,
                "logourl": "https://icons.brapi.dev/icons/PETR4.svg"
            }]
        }"#;

        let quote = provider().parse_quote("PETR4", body).unwrap();
        assert_eq!(quote.ticker, "PETR4");
        assert_eq!(quote.long_name.as_deref(), Some("Petróleo Brasileiro S.A."));
        assert_eq!(quote.short_name.as_deref(), Some("PETROBRAS PN"));
        assert_eq!(quote.price, Some(dec!(38.5)));
        assert_eq!(quote.change_percent, Some(dec!(-1.25)));
        assert_eq!(
            quote.logo_url.as_deref(),
            Some("https://icons.brapi.dev/icons/PETR4.svg")
        );
        assert_eq!(quote.source, "BRAPI");
    }

    #[test]
    fn test_generic_logo_is_dropped() {
        let body = r#"{"results":[{"symbol":"XPML11","logourl":"https://icons.brapi.dev/icons/BRAPI.svg"}]}"#;
        let quote = provider().parse_quote("XPML11", body).unwrap();
        assert!(quote.logo_url.is_none());
        assert!(quote.price.is_none());
    }

    #[test]
    fn test_error_message_is_symbol_not_found() {
        let body = r#"{"error":"Não encontramos a ação XPTO3"}"#;
        let err = provider().parse_quote("XPTO3", body).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(t) if t == "XPTO3"));
    }

    #[test]
    fn test_error_flag_is_symbol_not_found() {
        let body = r#"{"error":true,"message":"Ticker not found"}"#;
        let err = provider().parse_quote("XPTO3", body).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[test]
    fn test_empty_results_is_symbol_not_found() {
        let err = provider().parse_quote("XPTO3", r#"{"results":[]}"#).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("  Vale   S.A. "), Some("Vale S.A.".to_string()));
        assert_eq!(sanitize_name("   "), None);
    }
}
