use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::AssetClass;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Cost basis of open positions.
    pub total_invested: Decimal,
    /// Value of open positions with a known price. Unpriced ones are skipped.
    pub market_value: Decimal,
    pub unrealized_profit_loss: Decimal,
    pub unrealized_profit_loss_pct: Decimal,
    /// Summed over the whole history, closed positions included.
    pub realized_profit_loss: Decimal,
    pub position_count: usize,
    pub allocations: Vec<AllocationSlice>,
    /// Open positions with no known price.
    pub unpriced_tickers: Vec<String>,
}

impl PortfolioSummary {
    pub fn is_empty(&self) -> bool {
        self.position_count == 0
    }

    /// True when every open position had a price.
    pub fn is_fully_priced(&self) -> bool {
        self.unpriced_tickers.is_empty()
    }
}

/// Share of the portfolio held in one asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    /// `None` groups tickers missing from the asset registry.
    pub asset_class: Option<AssetClass>,
    pub invested: Decimal,
    pub market_value: Decimal,
    pub position_count: usize,
    /// Percent of total invested.
    pub percentage: Decimal,
}
