/// Decimal precision for average cost per unit
pub const AVERAGE_COST_DECIMAL_PRECISION: u32 = 8;

/// Decimal precision for money amounts sent to persistence or displayed
pub const MONEY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for percentages
pub const PERCENT_DECIMAL_PRECISION: u32 = 2;

/// Currency symbol used for display
pub const CURRENCY_SYMBOL: &str = "R$";
