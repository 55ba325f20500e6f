use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::portfolio::positions::Position;

/// Direction of an operation. Serialized with the backend's `movimento`
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    #[serde(rename = "Compra")]
    Buy,
    #[serde(rename = "Venda")]
    Sell,
}

impl OperationKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Buy => "Compra",
            OperationKind::Sell => "Venda",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "compra" | "buy" => Ok(OperationKind::Buy),
            "venda" | "sell" => Ok(OperationKind::Sell),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown operation '{}'; expected Compra or Venda",
                other
            ))
            .into()),
        }
    }
}

/// A buy or sell submitted by the user. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub ticker: String,
    pub kind: OperationKind,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl Operation {
    pub fn new(
        kind: OperationKind,
        ticker: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            kind,
            quantity,
            unit_price,
        }
    }

    pub fn buy(ticker: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self::new(OperationKind::Buy, ticker, quantity, unit_price)
    }

    pub fn sell(ticker: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self::new(OperationKind::Sell, ticker, quantity, unit_price)
    }
}

/// Everything the ledger needs to record one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    pub kind: OperationKind,
    pub ticker: String,
    pub operation_quantity: Decimal,
    pub unit_price: Decimal,
    /// `quantity * unit_price`, 2dp.
    pub operation_total: Decimal,
    /// Post-buy average for a buy, the pre-sell average for a sell. 8dp.
    pub average_cost: Decimal,
    /// Cost basis after the operation at full precision.
    pub total_cost: Decimal,
    /// `total_cost` at 2dp, the value persisted and displayed.
    pub total_invested: Decimal,
    pub final_quantity: Decimal,
    /// Cumulative realized P/L after the operation, 2dp.
    pub realized_profit_loss: Decimal,
    /// P/L realized by this operation alone; zero for buys. 2dp.
    pub operation_profit_loss: Decimal,
}

impl OperationResult {
    /// The history entry this operation leaves behind.
    pub fn to_position(&self) -> Position {
        Position {
            ticker: self.ticker.clone(),
            quantity: self.final_quantity,
            total_cost: self.total_invested,
            realized_profit_loss: self.realized_profit_loss,
        }
    }

    /// True when a sell closed the position.
    pub fn is_closing(&self) -> bool {
        self.kind == OperationKind::Sell && self.final_quantity.is_zero()
    }
}
