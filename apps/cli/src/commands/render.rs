//! Plain-text tables for terminal output.

use carteira_core::assets::Asset;
use carteira_core::portfolio::{OperationOutcome, PortfolioHolding, PortfolioSummary, Position};
use carteira_core::utils::decimal_utils::format_brl;
use rust_decimal::Decimal;

const MISSING: &str = "-";

fn money(value: Option<Decimal>) -> String {
    value.map(format_brl).unwrap_or_else(|| MISSING.to_string())
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.iter().map(|h| h.to_string()).collect())];
    out.extend(rows.into_iter().map(line));
    out.join("\n")
}

pub fn holdings(holdings: &[PortfolioHolding]) -> String {
    if holdings.is_empty() {
        return "No open positions.".to_string();
    }
    let rows = holdings
        .iter()
        .map(|h| {
            vec![
                h.ticker.clone(),
                h.asset_class
                    .map(|c| c.as_str().to_string())
                    .unwrap_or_else(|| MISSING.to_string()),
                h.quantity.normalize().to_string(),
                format_brl(h.average_cost),
                format_brl(h.total_invested),
                money(h.market_price),
                money(h.market_value),
                money(h.unrealized_profit_loss),
                format_brl(h.realized_profit_loss),
            ]
        })
        .collect();
    table(
        &[
            "TICKER", "CLASS", "QTY", "AVG COST", "INVESTED", "PRICE", "VALUE", "UNREALIZED",
            "REALIZED",
        ],
        rows,
    )
}

pub fn history(history: &[Position]) -> String {
    if history.is_empty() {
        return "No movements recorded.".to_string();
    }
    let rows = history
        .iter()
        .map(|p| {
            vec![
                p.ticker.clone(),
                p.quantity.normalize().to_string(),
                format_brl(p.total_cost),
                format_brl(p.realized_profit_loss),
                if p.is_open() { "open" } else { "closed" }.to_string(),
            ]
        })
        .collect();
    table(&["TICKER", "QTY", "COST", "REALIZED", "STATUS"], rows)
}

pub fn summary(summary: &PortfolioSummary) -> String {
    let mut out = vec![
        format!("Positions:        {}", summary.position_count),
        format!("Invested:         {}", format_brl(summary.total_invested)),
        format!("Market value:     {}", format_brl(summary.market_value)),
        format!(
            "Unrealized P/L:   {} ({}%)",
            format_brl(summary.unrealized_profit_loss),
            summary.unrealized_profit_loss_pct
        ),
        format!("Realized P/L:     {}", format_brl(summary.realized_profit_loss)),
    ];

    if !summary.allocations.is_empty() {
        out.push(String::new());
        let rows = summary
            .allocations
            .iter()
            .map(|slice| {
                vec![
                    slice
                        .asset_class
                        .map(|c| c.label().to_string())
                        .unwrap_or_else(|| "Sem cadastro".to_string()),
                    slice.position_count.to_string(),
                    format_brl(slice.invested),
                    format!("{}%", slice.percentage),
                ]
            })
            .collect();
        out.push(table(&["CLASS", "POSITIONS", "INVESTED", "SHARE"], rows));
    }

    if !summary.is_fully_priced() {
        out.push(String::new());
        out.push(format!("Unpriced: {}", summary.unpriced_tickers.join(", ")));
    }
    out.join("\n")
}

pub fn assets(assets: &[Asset]) -> String {
    if assets.is_empty() {
        return "No assets registered.".to_string();
    }
    let rows = assets
        .iter()
        .map(|a| {
            vec![
                a.ticker.clone(),
                a.asset_class.as_str().to_string(),
                a.display_name().to_string(),
                money(a.price),
                a.change_percent
                    .map(|c| format!("{}%", c))
                    .unwrap_or_else(|| MISSING.to_string()),
            ]
        })
        .collect();
    table(&["TICKER", "CLASS", "NAME", "PRICE", "CHANGE"], rows)
}

pub fn operation(outcome: &OperationOutcome) -> String {
    let result = &outcome.result;
    let mut out = vec![format!(
        "{} {} {} @ {} = {}",
        result.kind,
        result.operation_quantity.normalize(),
        result.ticker,
        format_brl(result.unit_price),
        format_brl(result.operation_total)
    )];
    out.push(format!(
        "Position: {} units, invested {}, average {}",
        result.final_quantity.normalize(),
        format_brl(result.total_invested),
        format_brl(result.average_cost)
    ));
    if !result.operation_profit_loss.is_zero() {
        out.push(format!(
            "Operation P/L: {} (realized total {})",
            format_brl(result.operation_profit_loss),
            format_brl(result.realized_profit_loss)
        ));
    }
    if !outcome.persisted {
        out.push("Not saved to the backend; kept locally only.".to_string());
    }
    out.join("\n")
}
