use log::debug;
use rust_decimal::Decimal;

use super::operation_model::{Operation, OperationKind, OperationResult};
use crate::errors::{Error, Result, ValidationError};
use crate::portfolio::positions::Position;
use crate::utils::decimal_utils::{average_cost, round_average_cost, round_money};

/// Computes the outcome of `operation` against the ticker's state.
///
/// `current_position` is the open position (quantity > 0), if any.
/// `historical_record` is the history entry for the ticker and may be closed;
/// it is what carries realized P/L across a sell-to-zero followed by a rebuy.
///
/// Validation and insufficient-position errors are returned before anything
/// is computed.
pub fn compute_operation(
    operation: &Operation,
    current_position: Option<&Position>,
    historical_record: Option<&Position>,
) -> Result<OperationResult> {
    validate(operation, current_position, historical_record)?;

    let current_position = current_position.filter(|position| position.is_open());
    let result = match operation.kind {
        OperationKind::Buy => compute_buy(operation, current_position, historical_record)?,
        OperationKind::Sell => compute_sell(operation, current_position)?,
    };

    debug!(
        "{} {} x {} @ {} -> qty {}, invested {}, avg {}, realized {}",
        result.kind,
        result.ticker,
        result.operation_quantity,
        result.unit_price,
        result.final_quantity,
        result.total_invested,
        result.average_cost,
        result.realized_profit_loss
    );
    Ok(result)
}

fn validate(
    operation: &Operation,
    current_position: Option<&Position>,
    historical_record: Option<&Position>,
) -> Result<()> {
    if operation.ticker.trim().is_empty() {
        return Err(ValidationError::MissingField("ticker".to_string()).into());
    }
    if operation.quantity <= Decimal::ZERO {
        return Err(ValidationError::NonPositive {
            field: "quantity".to_string(),
            value: operation.quantity,
        }
        .into());
    }
    if operation.unit_price <= Decimal::ZERO {
        return Err(ValidationError::NonPositive {
            field: "unit_price".to_string(),
            value: operation.unit_price,
        }
        .into());
    }
    for position in current_position.into_iter().chain(historical_record) {
        if position.ticker != operation.ticker {
            return Err(ValidationError::InvalidInput(format!(
                "Position for {} does not match operation ticker {}",
                position.ticker, operation.ticker
            ))
            .into());
        }
    }
    Ok(())
}

fn compute_buy(
    operation: &Operation,
    current_position: Option<&Position>,
    historical_record: Option<&Position>,
) -> Result<OperationResult> {
    let operation_total = checked_mul(operation.quantity, operation.unit_price)?;

    let (total_cost, final_quantity, average, realized) = match current_position {
        Some(position) => {
            let total_cost = checked_add(position.total_cost, operation_total)?;
            let final_quantity = checked_add(position.quantity, operation.quantity)?;
            let average = average_cost(total_cost, final_quantity).ok_or_else(|| {
                Error::Unexpected(format!("No average cost for {}", operation.ticker))
            })?;
            let realized = historical_record
                .map(|record| record.realized_profit_loss)
                .unwrap_or(position.realized_profit_loss);
            (total_cost, final_quantity, average, realized)
        }
        None => {
            let realized = historical_record
                .map(|record| record.realized_profit_loss)
                .unwrap_or(Decimal::ZERO);
            (
                operation_total,
                operation.quantity,
                round_average_cost(operation.unit_price),
                realized,
            )
        }
    };

    Ok(OperationResult {
        kind: OperationKind::Buy,
        ticker: operation.ticker.clone(),
        operation_quantity: operation.quantity,
        unit_price: operation.unit_price,
        operation_total: round_money(operation_total),
        average_cost: average,
        total_cost,
        total_invested: round_money(total_cost),
        final_quantity,
        realized_profit_loss: round_money(realized),
        operation_profit_loss: Decimal::ZERO,
    })
}

fn compute_sell(
    operation: &Operation,
    current_position: Option<&Position>,
) -> Result<OperationResult> {
    let position = match current_position {
        Some(position) if operation.quantity <= position.quantity => position,
        other => {
            return Err(Error::InsufficientPosition {
                ticker: operation.ticker.clone(),
                requested: operation.quantity,
                held: other.map(|p| p.quantity).unwrap_or(Decimal::ZERO),
            })
        }
    };

    // Fixed for the whole operation: proceeds are measured against the pre-sell cost.
    let average = position.average_cost().ok_or_else(|| {
        Error::Unexpected(format!("No average cost for {}", operation.ticker))
    })?;

    let operation_total = checked_mul(operation.quantity, operation.unit_price)?;
    let operation_profit_loss =
        round_money(checked_mul(operation.unit_price - average, operation.quantity)?);
    let realized = round_money(checked_add(
        position.realized_profit_loss,
        operation_profit_loss,
    )?);

    let final_quantity = position.quantity - operation.quantity;
    let total_cost = if final_quantity.is_zero() {
        Decimal::ZERO
    } else {
        checked_mul(final_quantity, average)?
    };

    Ok(OperationResult {
        kind: OperationKind::Sell,
        ticker: operation.ticker.clone(),
        operation_quantity: operation.quantity,
        unit_price: operation.unit_price,
        operation_total: round_money(operation_total),
        average_cost: average,
        total_cost,
        total_invested: round_money(total_cost),
        final_quantity,
        realized_profit_loss: realized,
        operation_profit_loss,
    })
}

fn checked_mul(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_mul(b).ok_or_else(|| {
        ValidationError::InvalidInput(format!("{} x {} is out of range", a, b)).into()
    })
}

fn checked_add(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b).ok_or_else(|| {
        ValidationError::InvalidInput(format!("{} + {} is out of range", a, b)).into()
    })
}
