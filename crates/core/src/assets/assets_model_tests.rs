use super::assets_model::*;
use carteira_market_data::AssetQuote;
use rust_decimal_macros::dec;

#[test]
fn test_asset_class_wire_values() {
    assert_eq!(AssetClass::Stock.as_str(), "ACAO");
    assert_eq!(AssetClass::Reit.as_str(), "FII");
    assert_eq!(AssetClass::Etf.as_str(), "ETF");
    assert_eq!(AssetClass::Bdr.as_str(), "BDR");
}

#[test]
fn test_asset_class_accepts_aliases() {
    assert_eq!("ação".parse::<AssetClass>().unwrap(), AssetClass::Stock);
    assert_eq!("acao".parse::<AssetClass>().unwrap(), AssetClass::Stock);
    assert_eq!(" fii ".parse::<AssetClass>().unwrap(), AssetClass::Reit);
    assert_eq!("etf".parse::<AssetClass>().unwrap(), AssetClass::Etf);
    assert!("CRIPTO".parse::<AssetClass>().is_err());
}

#[test]
fn test_asset_class_serde_round_trip_uses_wire_value() {
    let json = serde_json::to_string(&AssetClass::Reit).unwrap();
    assert_eq!(json, "\"FII\"");
    let parsed: AssetClass = serde_json::from_str("\"Ação\"").unwrap();
    assert_eq!(parsed, AssetClass::Stock);
}

#[test]
fn test_normalize_ticker() {
    assert_eq!(normalize_ticker(" petr4 ").unwrap(), "PETR4");
    assert!(normalize_ticker("   ").is_err());
    assert!(normalize_ticker("PETR 4").is_err());
}

#[test]
fn test_apply_quote_replaces_market_fields() {
    let mut asset = Asset::new("VALE3", AssetClass::Stock)
        .with_name("VALE3")
        .with_price(dec!(60));

    let mut quote = AssetQuote::empty("VALE3", "BRAPI");
    quote.short_name = Some("VALE ON".to_string());
    quote.change_percent = Some(dec!(0.5));
    asset.apply_quote(&quote);

    assert_eq!(asset.name.as_deref(), Some("VALE ON"));
    // A quote without a price clears the stale one
    assert_eq!(asset.price, None);
    assert_eq!(asset.change_percent, Some(dec!(0.5)));
}

#[test]
fn test_apply_quote_keeps_name_when_quote_has_none() {
    let mut asset = Asset::new("XPML11", AssetClass::Reit).with_name("XP Malls");
    let mut quote = AssetQuote::empty("XPML11", "BRAPI");
    quote.price = Some(dec!(101.2));
    asset.apply_quote(&quote);
    assert_eq!(asset.display_name(), "XP Malls");
    assert_eq!(asset.price, Some(dec!(101.2)));
}

#[test]
fn test_new_asset_without_quote_uses_ticker_as_name() {
    let new_asset = NewAsset::new("BOVA11", AssetClass::Etf).with_quote(None);
    assert_eq!(new_asset.long_name.as_deref(), Some("BOVA11"));
    let asset = new_asset.to_asset(None);
    assert_eq!(asset.display_name(), "BOVA11");
    assert!(asset.price.is_none());
}

#[test]
fn test_asset_update_apply_to() {
    let asset = Asset::new("ITSA4", AssetClass::Stock).with_price(dec!(10));
    let update = AssetUpdate {
        ticker: Some("ITSA3".to_string()),
        asset_class: None,
    };
    let updated = update.apply_to(&asset);
    assert_eq!(updated.ticker, "ITSA3");
    assert_eq!(updated.asset_class, AssetClass::Stock);
    assert_eq!(updated.price, Some(dec!(10)));
    assert!(AssetUpdate::default().is_empty());
}
