//! Wire models for `/movimentacoes`.

use carteira_core::portfolio::{MovementRecord, Position};
use carteira_core::utils::decimal_serde::deserialize_decimal_or_zero;
use carteira_core::utils::decimal_utils::{money_amount, round_average_cost};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `GET /movimentacoes/carteira`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarteiraResponse {
    #[serde(default)]
    pub carteira: Option<Vec<PositionDTO>>,
}

impl CarteiraResponse {
    pub fn into_positions(self) -> Vec<Position> {
        self.carteira
            .unwrap_or_default()
            .into_iter()
            .map(Position::from)
            .collect()
    }
}

/// One row of the backend position history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionDTO {
    pub ticker: String,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub qtd_carteira: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub total_investido: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
    pub lucro_investimento: Decimal,
}

impl From<PositionDTO> for Position {
    fn from(dto: PositionDTO) -> Self {
        Position::new(
            dto.ticker.trim().to_uppercase(),
            dto.qtd_carteira,
            dto.total_investido,
            dto.lucro_investimento,
        )
    }
}

/// Form body of `POST /movimentacoes`. Every amount is a decimal string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementForm {
    pub movimento: String,
    pub preco_medio: String,
    pub qtd_operacao: String,
    pub qtd_carteira: String,
    pub ticker: String,
    pub valor: String,
    pub total_operacao: String,
    pub total_investido: String,
    pub lucro_operacao: String,
    pub lucro_investimento: String,
}

impl From<&MovementRecord> for MovementForm {
    fn from(record: &MovementRecord) -> Self {
        Self {
            movimento: record.kind.as_str().to_string(),
            preco_medio: round_average_cost(record.average_cost).normalize().to_string(),
            qtd_operacao: record.operation_quantity.normalize().to_string(),
            qtd_carteira: record.final_quantity.normalize().to_string(),
            ticker: record.ticker.clone(),
            valor: record.unit_price.normalize().to_string(),
            total_operacao: money(record.operation_total),
            total_investido: money(record.total_invested),
            lucro_operacao: money(record.operation_profit_loss),
            lucro_investimento: money(record.realized_profit_loss),
        }
    }
}

/// Two fixed decimal places, e.g. `100.00`.
fn money(value: Decimal) -> String {
    money_amount(value).to_string()
}
