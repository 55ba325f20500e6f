use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::portfolio::accounting::{OperationKind, OperationResult};

/// A movement as sent to the backend ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRecord {
    /// Client-side id, for log correlation only.
    pub id: String,
    pub kind: OperationKind,
    pub ticker: String,
    pub average_cost: Decimal,
    pub operation_quantity: Decimal,
    pub final_quantity: Decimal,
    pub unit_price: Decimal,
    pub operation_total: Decimal,
    pub total_invested: Decimal,
    pub operation_profit_loss: Decimal,
    pub realized_profit_loss: Decimal,
    pub recorded_at: DateTime<Utc>,
}

impl MovementRecord {
    pub fn from_result(result: &OperationResult) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: result.kind,
            ticker: result.ticker.clone(),
            average_cost: result.average_cost,
            operation_quantity: result.operation_quantity,
            final_quantity: result.final_quantity,
            unit_price: result.unit_price,
            operation_total: result.operation_total,
            total_invested: result.total_invested,
            operation_profit_loss: result.operation_profit_loss,
            realized_profit_loss: result.realized_profit_loss,
            recorded_at: Utc::now(),
        }
    }
}

/// What happened to an operation after it was computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
    pub result: OperationResult,
    /// False when the backend never accepted the movement and only the local
    /// mirror reflects it.
    pub persisted: bool,
    pub warning: Option<String>,
}
