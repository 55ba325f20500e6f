//! Exact base-10 arithmetic helpers for money and quantity fields.
//!
//! Every amount in the engine is a [`Decimal`]; binary floating point never
//! touches a cost basis. Average cost is kept at 8 decimal places, amounts
//! sent to persistence or displayed are rounded to 2.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{
    AVERAGE_COST_DECIMAL_PRECISION, CURRENCY_SYMBOL, MONEY_DECIMAL_PRECISION,
    PERCENT_DECIMAL_PRECISION,
};
use crate::errors::{Result, ValidationError};

/// Rounds a money amount to 2 decimal places, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// Money amount for output: rounded and carrying exactly 2 decimal places,
/// so `110` is written as `110.00`.
pub fn money_amount(value: Decimal) -> Decimal {
    let mut rounded = round_money(value);
    rounded.rescale(MONEY_DECIMAL_PRECISION);
    rounded
}

/// Rounds an average cost to 8 decimal places, half away from zero.
pub fn round_average_cost(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        AVERAGE_COST_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Rounds a percentage to 2 decimal places, half away from zero.
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        PERCENT_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Cost per unit at 8 decimal places.
///
/// Returns `None` when `quantity` is not positive; the average cost of an
/// empty position is undefined.
pub fn average_cost(total_cost: Decimal, quantity: Decimal) -> Option<Decimal> {
    if quantity <= Decimal::ZERO {
        return None;
    }
    total_cost.checked_div(quantity).map(round_average_cost)
}

/// `part / whole * 100` at 2 decimal places, or zero when `whole` is zero.
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .map(|ratio| round_percent(ratio * Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Parses a number typed by a user.
///
/// Accepts the plain form (`10.50`) and the Brazilian form with a decimal
/// comma and optional dot grouping (`10,50`, `1.234,56`).
pub fn parse_decimal_input(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidInput("empty number".to_string()).into());
    }

    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|_| {
            ValidationError::InvalidInput(format!("'{}' is not a valid number", raw)).into()
        })
}

/// Formats an amount as Brazilian reais, e.g. `R$ 12.345,67`.
pub fn format_brl(value: Decimal) -> String {
    let rounded = money_amount(value).abs();
    let plain = rounded.to_string();
    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit);
    }

    let sign = if value < Decimal::ZERO && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{} {},{}", sign, CURRENCY_SYMBOL, grouped, fraction)
}
