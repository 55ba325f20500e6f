//! Quote provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::AssetQuote;

/// Trait for quote providers.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use carteira_market_data::{AssetQuote, MarketDataError, QuoteProvider};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl QuoteProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn latest_quote(&self, ticker: &str) -> Result<AssetQuote, MarketDataError> {
///         Ok(AssetQuote::empty(ticker, self.id()))
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider, used for logging and as quote source.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for a ticker.
    async fn latest_quote(&self, ticker: &str) -> Result<AssetQuote, MarketDataError>;
}
