use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use log::debug;
use rust_decimal::Decimal;

use super::summary_model::{AllocationSlice, PortfolioSummary};
use crate::assets::{AssetClass, AssetLookup};
use crate::events::{StoreEvent, StoreListener};
use crate::portfolio::positions::Position;
use crate::store::StoreState;
use crate::utils::decimal_utils::{money_amount, percentage_of};

#[derive(Default)]
struct SliceTotals {
    invested: Decimal,
    market_value: Decimal,
    position_count: usize,
}

/// Computes the portfolio summary from the history and the asset registry.
pub fn compute_summary(history: &[Position], assets: &dyn AssetLookup) -> PortfolioSummary {
    let mut total_invested = Decimal::ZERO;
    let mut market_value = Decimal::ZERO;
    // Cost basis of the positions that contribute to `market_value`.
    let mut priced_invested = Decimal::ZERO;
    let mut position_count = 0;
    let mut unpriced_tickers = Vec::new();
    let mut slices: BTreeMap<Option<AssetClass>, SliceTotals> = BTreeMap::new();

    let realized_profit_loss: Decimal = history.iter().map(|p| p.realized_profit_loss).sum();

    for position in history.iter().filter(|p| p.is_open()) {
        let asset = assets.asset(&position.ticker);
        let slice = slices.entry(asset.map(|a| a.asset_class)).or_default();

        position_count += 1;
        total_invested += position.total_cost;
        slice.invested += position.total_cost;
        slice.position_count += 1;

        match asset.and_then(|a| a.price) {
            Some(price) => {
                let value = price * position.quantity;
                market_value += value;
                priced_invested += position.total_cost;
                slice.market_value += value;
            }
            None => unpriced_tickers.push(position.ticker.clone()),
        }
    }

    let total_invested = money_amount(total_invested);
    let market_value = money_amount(market_value);
    let priced_invested = money_amount(priced_invested);
    let unrealized_profit_loss = market_value - priced_invested;

    let allocations = slices
        .into_iter()
        .map(|(asset_class, totals)| AllocationSlice {
            asset_class,
            invested: money_amount(totals.invested),
            market_value: money_amount(totals.market_value),
            position_count: totals.position_count,
            percentage: percentage_of(totals.invested, total_invested),
        })
        .collect();

    unpriced_tickers.sort();

    PortfolioSummary {
        total_invested,
        market_value,
        unrealized_profit_loss,
        unrealized_profit_loss_pct: percentage_of(unrealized_profit_loss, priced_invested),
        realized_profit_loss: money_amount(realized_profit_loss),
        position_count,
        allocations,
        unpriced_tickers,
    }
}

/// Store listener that keeps an up-to-date summary.
#[derive(Default)]
pub struct SummaryObserver {
    summary: RwLock<PortfolioSummary>,
}

impl SummaryObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> PortfolioSummary {
        self.summary
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StoreListener for SummaryObserver {
    fn on_change(&self, state: &StoreState, event: &StoreEvent) {
        let summary = compute_summary(&state.history, state);
        debug!(
            "Summary recomputed after {:?}: invested {}, market value {}",
            event, summary.total_invested, summary.market_value
        );
        *self.summary.write().unwrap_or_else(PoisonError::into_inner) = summary;
    }
}
