mod render;

use anyhow::{Context, Result};
use carteira_core::assets::{AssetClass, AssetServiceTrait, AssetUpdate, NewAsset};
use carteira_core::portfolio::{Operation, OperationKind, ReconciliationServiceTrait};
use carteira_core::utils::decimal_utils::parse_decimal_input;
use serde::Serialize;

use crate::main_lib::AppState;

fn print<T: Serialize>(value: &T, json: bool, text: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

fn print_warning(warning: Option<&str>) {
    if let Some(warning) = warning {
        eprintln!("warning: {}", warning);
    }
}

/// Fills the store from the backend. A failed load leaves the local mirror
/// empty and is reported, not fatal.
pub async fn load(state: &AppState) {
    if let Err(e) = state.reconciliation_service.load_history().await {
        eprintln!("warning: could not load position history: {}", e);
    }
    if let Err(e) = state.asset_service.load_assets().await {
        eprintln!("warning: could not load assets: {}", e);
    }
}

pub fn positions(state: &AppState, json: bool) -> Result<()> {
    let holdings = state.reconciliation_service.visible_portfolio();
    print(&holdings, json, |h| render::holdings(h))
}

pub fn history(state: &AppState, json: bool) -> Result<()> {
    let history = state.reconciliation_service.history();
    print(&history, json, |h| render::history(h))
}

pub fn summary(state: &AppState, json: bool) -> Result<()> {
    print(&state.summary.summary(), json, render::summary)
}

pub async fn operate(
    state: &AppState,
    kind: OperationKind,
    ticker: &str,
    quantity: &str,
    price: &str,
    json: bool,
) -> Result<()> {
    let quantity = parse_decimal_input(quantity).context("Invalid quantity")?;
    let unit_price = parse_decimal_input(price).context("Invalid price")?;

    let outcome = state
        .reconciliation_service
        .apply_operation(Operation::new(kind, ticker, quantity, unit_price))
        .await?;

    print_warning(outcome.warning.as_deref());
    print(&outcome, json, render::operation)
}

pub fn list_assets(state: &AppState, json: bool) -> Result<()> {
    print(&state.asset_service.get_assets(), json, |a| render::assets(a))
}

pub async fn add_asset(
    state: &AppState,
    ticker: &str,
    asset_class: AssetClass,
    json: bool,
) -> Result<()> {
    let outcome = state
        .asset_service
        .create_asset(NewAsset::new(ticker, asset_class))
        .await?;

    print_warning(outcome.warning.as_deref());
    if !outcome.persisted {
        eprintln!("warning: {} kept locally only", outcome.value.ticker);
    }
    print(&outcome.value, json, |a| render::assets(std::slice::from_ref(a)))
}

pub async fn update_asset(
    state: &AppState,
    ticker: &str,
    update: AssetUpdate,
    json: bool,
) -> Result<()> {
    let outcome = state.asset_service.update_asset(ticker, update).await?;

    print_warning(outcome.warning.as_deref());
    if !outcome.persisted {
        eprintln!("warning: {} kept locally only", outcome.value.ticker);
    }
    print(&outcome.value, json, |a| render::assets(std::slice::from_ref(a)))
}

pub async fn remove_asset(state: &AppState, ticker: &str) -> Result<()> {
    state.asset_service.delete_asset(ticker).await?;
    println!("Removed {}", ticker.trim().to_uppercase());
    Ok(())
}
