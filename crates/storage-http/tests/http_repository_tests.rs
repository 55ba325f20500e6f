//! HTTP-level tests for the REST repositories against a mock server.

use std::sync::Arc;
use std::time::Duration;

use carteira_core::assets::{AssetClass, AssetRepositoryTrait, AssetUpdate, NewAsset};
use carteira_core::errors::{Error, PersistenceError};
use carteira_core::portfolio::{
    compute_operation, MovementRecord, Operation, PortfolioRepositoryTrait, Position,
};
use carteira_storage_http::{ApiClient, HttpAssetRepository, HttpPortfolioRepository};
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use rust_decimal_macros::dec;
use serde_json::json;

fn client_for(server: &MockServer) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(&server.base_url(), Duration::from_secs(5)).unwrap())
}

#[tokio::test]
async fn test_get_history_decodes_rows() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/movimentacoes/carteira");
            then.status(200).json_body(json!({
                "carteira": [
                    {"ticker": "PETR4", "qtd_carteira": 15, "total_investido": 225.0, "lucro_investimento": 15.0},
                    {"ticker": "ITSA4", "qtd_carteira": 0, "total_investido": 0, "lucro_investimento": 42.1}
                ]
            }));
        })
        .await;

    let repository = HttpPortfolioRepository::new(client_for(&server));
    let history = repository.get_history().await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        history,
        vec![
            Position::new("PETR4", dec!(15), dec!(225), dec!(15)),
            Position::new("ITSA4", dec!(0), dec!(0), dec!(42.1)),
        ]
    );
}

#[tokio::test]
async fn test_record_movement_posts_form() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/movimentacoes")
                .header("content-type", "application/x-www-form-urlencoded")
                .body_contains("movimento=Compra")
                .body_contains("ticker=PETR4")
                .body_contains("qtd_carteira=10")
                .body_contains("total_investido=100.00")
                .body_contains("lucro_investimento=0.00");
            then.status(201).json_body(json!({"message": "ok"}));
        })
        .await;

    let result = compute_operation(&Operation::buy("PETR4", dec!(10), dec!(10)), None, None).unwrap();
    let repository = HttpPortfolioRepository::new(client_for(&server));
    repository
        .record_movement(&MovementRecord::from_result(&result))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_is_persistence_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/movimentacoes");
            then.status(500)
                .json_body(json!({"message": "Falha ao registrar a movimentação"}));
        })
        .await;

    let result = compute_operation(&Operation::buy("VALE3", dec!(1), dec!(60)), None, None).unwrap();
    let repository = HttpPortfolioRepository::new(client_for(&server));
    let err = repository
        .record_movement(&MovementRecord::from_result(&result))
        .await
        .unwrap_err();

    match err {
        Error::Persistence(PersistenceError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Falha ao registrar a movimentação");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_recoverable() {
    // Nothing listens on port 9 (discard) in the test environment.
    let client = Arc::new(ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap());
    let repository = HttpPortfolioRepository::new(client);

    let err = repository.get_history().await.unwrap_err();
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn test_list_assets() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/ativos");
            then.status(200).json_body(json!({
                "ativos": [
                    {"ticker": "BOVA11", "long_name": "iShares Ibovespa", "short_name": "BOVA11", "classe_b3": "ETF"}
                ]
            }));
        })
        .await;

    let repository = HttpAssetRepository::new(client_for(&server));
    let assets = repository.list().await.unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].asset_class, AssetClass::Etf);
    assert_eq!(assets[0].name.as_deref(), Some("iShares Ibovespa"));
}

#[tokio::test]
async fn test_create_asset_posts_form_and_decodes_response() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/ativos")
                .body_contains("ticker=HGLG11")
                .body_contains("classe_b3=FII");
            then.status(201).json_body(json!({
                "ticker": "HGLG11",
                "long_name": "CSHG Logistica",
                "short_name": "HGLG11",
                "classe_b3": "FII"
            }));
        })
        .await;

    let mut new_asset = NewAsset::new("HGLG11", AssetClass::Reit);
    new_asset.long_name = Some("CSHG Logistica".to_string());

    let repository = HttpAssetRepository::new(client_for(&server));
    let created = repository.create(&new_asset).await.unwrap();

    mock.assert_async().await;
    assert_eq!(created.ticker, "HGLG11");
    assert_eq!(created.asset_class, AssetClass::Reit);
}

#[tokio::test]
async fn test_update_and_delete_use_ticker_query() {
    let server = MockServer::start_async().await;
    let patch = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/ativos")
                .query_param("ticker", "ITSA4")
                .body_contains("ticker=ITSA3");
            then.status(200).json_body(json!({
                "ticker": "ITSA3",
                "long_name": "Itausa",
                "short_name": null,
                "classe_b3": "ACAO"
            }));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/ativos").query_param("ticker", "ITSA3");
            then.status(200).json_body(json!({"message": "deleted"}));
        })
        .await;

    let repository = HttpAssetRepository::new(client_for(&server));
    let updated = repository
        .update(
            "ITSA4",
            &AssetUpdate {
                ticker: Some("ITSA3".to_string()),
                asset_class: None,
            },
        )
        .await
        .unwrap();
    repository.delete("ITSA3").await.unwrap();

    patch.assert_async().await;
    delete.assert_async().await;
    assert_eq!(updated.ticker, "ITSA3");
}

#[tokio::test]
async fn test_delete_failure_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/ativos");
            then.status(404);
        })
        .await;

    let repository = HttpAssetRepository::new(client_for(&server));
    let err = repository.delete("NADA3").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Persistence(PersistenceError::Status { status: 404, .. })
    ));
}
