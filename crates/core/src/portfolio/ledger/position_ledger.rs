use std::collections::BTreeMap;

use log::debug;
use rust_decimal::Decimal;

use crate::assets::AssetLookup;
use crate::portfolio::positions::{PortfolioHolding, Position};

/// Position History as a value: one entry per ticker, closed ones included.
///
/// The visible portfolio is always derived from it and never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionLedger {
    positions: BTreeMap<String, Position>,
}

impl PositionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the ledger from raw history rows. When a ticker appears more
    /// than once the later row wins.
    pub fn from_history(history: Vec<Position>) -> Self {
        let mut positions = BTreeMap::new();
        for position in history {
            if let Some(previous) = positions.insert(position.ticker.clone(), position.sanitized()) {
                debug!("Duplicate history entry for {}, keeping the later one", previous.ticker);
            }
        }
        Self { positions }
    }

    /// History entry for `ticker`, open or closed.
    pub fn record(&self, ticker: &str) -> Option<&Position> {
        self.positions.get(ticker)
    }

    /// Open position for `ticker`.
    pub fn current_position(&self, ticker: &str) -> Option<&Position> {
        self.record(ticker).filter(|position| position.is_open())
    }

    /// All history entries, ordered by ticker.
    pub fn history(&self) -> Vec<Position> {
        self.positions.values().cloned().collect()
    }

    pub fn into_history(self) -> Vec<Position> {
        self.positions.into_values().collect()
    }

    pub fn visible_positions(&self) -> Vec<&Position> {
        self.positions.values().filter(|p| p.is_open()).collect()
    }

    /// Open positions joined with asset metadata, ordered by ticker.
    pub fn visible_portfolio(&self, assets: &dyn AssetLookup) -> Vec<PortfolioHolding> {
        self.visible_positions()
            .into_iter()
            .map(|position| PortfolioHolding::from_position(position, assets.asset(&position.ticker)))
            .collect()
    }

    /// Replaces the entry with the same ticker, or inserts it.
    pub fn upsert(&mut self, position: Position) {
        self.positions.insert(position.ticker.clone(), position);
    }

    /// Realized P/L summed over every entry, closed positions included.
    pub fn total_realized_profit_loss(&self) -> Decimal {
        self.positions
            .values()
            .map(|position| position.realized_profit_loss)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
