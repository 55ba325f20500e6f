use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::{Asset, AssetClass};
use crate::utils::decimal_utils::{average_cost, round_money};

/// Average-cost position for one ticker.
///
/// Also the Position History entry: once a position is sold down to zero it
/// stays in the history with `quantity == 0` and `total_cost == 0` so its
/// realized profit/loss is never lost.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub ticker: String,
    pub quantity: Decimal,
    /// Cost basis of the units still held.
    pub total_cost: Decimal,
    /// Cumulative realized profit/loss, signed. Never reset.
    pub realized_profit_loss: Decimal,
}

impl Position {
    pub fn new(
        ticker: impl Into<String>,
        quantity: Decimal,
        total_cost: Decimal,
        realized_profit_loss: Decimal,
    ) -> Self {
        Position {
            ticker: ticker.into(),
            quantity,
            total_cost,
            realized_profit_loss,
        }
    }

    /// Cost per unit at 8 decimal places, `None` for a closed position.
    pub fn average_cost(&self) -> Option<Decimal> {
        average_cost(self.total_cost, self.quantity)
    }

    /// True when units are held. Only open positions are visible.
    pub fn is_open(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    /// Enforces the history invariants on a record read from the backend.
    ///
    /// Negative quantities are clamped to zero, and a zero quantity always
    /// carries a zero cost basis.
    pub fn sanitized(mut self) -> Self {
        if self.quantity < Decimal::ZERO {
            warn!(
                "Position {} has negative quantity {}. Treating as closed.",
                self.ticker, self.quantity
            );
            self.quantity = Decimal::ZERO;
        }
        if self.total_cost < Decimal::ZERO {
            warn!(
                "Position {} has negative total cost {}. Clamping to zero.",
                self.ticker, self.total_cost
            );
            self.total_cost = Decimal::ZERO;
        }
        if self.quantity.is_zero() && !self.total_cost.is_zero() {
            self.total_cost = Decimal::ZERO;
        }
        self
    }
}

/// An open position joined with its asset metadata, as shown to the user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioHolding {
    pub ticker: String,
    pub name: Option<String>,
    /// `None` when the ticker is not in the asset registry.
    pub asset_class: Option<AssetClass>,
    pub quantity: Decimal,
    pub average_cost: Decimal,
    pub total_invested: Decimal,
    pub market_price: Option<Decimal>,
    pub market_value: Option<Decimal>,
    pub unrealized_profit_loss: Option<Decimal>,
    pub realized_profit_loss: Decimal,
}

impl PortfolioHolding {
    pub fn from_position(position: &Position, asset: Option<&Asset>) -> Self {
        let market_price = asset.and_then(|a| a.price);
        let market_value = market_price.map(|price| round_money(price * position.quantity));
        let total_invested = round_money(position.total_cost);

        PortfolioHolding {
            ticker: position.ticker.clone(),
            name: asset.and_then(|a| a.name.clone()),
            asset_class: asset.map(|a| a.asset_class),
            quantity: position.quantity,
            average_cost: position.average_cost().unwrap_or(Decimal::ZERO),
            total_invested,
            market_price,
            market_value,
            unrealized_profit_loss: market_value.map(|value| value - total_invested),
            realized_profit_loss: position.realized_profit_loss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_average_cost_of_closed_position_is_none() {
        let closed = Position::new("PETR4", dec!(0), dec!(0), dec!(15));
        assert_eq!(closed.average_cost(), None);
        assert!(!closed.is_open());

        let open = Position::new("PETR4", dec!(15), dec!(225), dec!(15));
        assert_eq!(open.average_cost(), Some(dec!(15)));
    }

    #[test]
    fn test_sanitized_zeroes_cost_of_empty_position() {
        let position = Position::new("VALE3", dec!(0), dec!(0.01), dec!(-3)).sanitized();
        assert_eq!(position.total_cost, Decimal::ZERO);
        assert_eq!(position.realized_profit_loss, dec!(-3));

        let negative = Position::new("VALE3", dec!(-2), dec!(10), dec!(0)).sanitized();
        assert_eq!(negative.quantity, Decimal::ZERO);
        assert_eq!(negative.total_cost, Decimal::ZERO);
    }

    #[test]
    fn test_holding_without_price_has_no_market_value() {
        let position = Position::new("XPML11", dec!(10), dec!(1000), dec!(0));
        let asset = Asset::new("XPML11", AssetClass::Reit);
        let holding = PortfolioHolding::from_position(&position, Some(&asset));
        assert_eq!(holding.asset_class, Some(AssetClass::Reit));
        assert_eq!(holding.market_value, None);
        assert_eq!(holding.unrealized_profit_loss, None);
        assert_eq!(holding.average_cost, dec!(100));
    }

    #[test]
    fn test_holding_with_price() {
        let position = Position::new("BBAS3", dec!(20), dec!(300), dec!(0));
        let asset = Asset::new("BBAS3", AssetClass::Stock).with_price(dec!(16.5));
        let holding = PortfolioHolding::from_position(&position, Some(&asset));
        assert_eq!(holding.market_value, Some(dec!(330.00)));
        assert_eq!(holding.unrealized_profit_loss, Some(dec!(30.00)));
    }
}
