use std::sync::Arc;

use anyhow::Context;
use carteira_core::assets::AssetService;
use carteira_core::portfolio::{ReconciliationService, SummaryObserver};
use carteira_core::store::PortfolioStore;
use carteira_market_data::provider::brapi::BrapiProvider;
use carteira_market_data::QuoteProvider;
use carteira_storage_http::{ApiClient, HttpAssetRepository, HttpPortfolioRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat};

/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub struct AppState {
    pub asset_service: Arc<AssetService>,
    pub reconciliation_service: Arc<ReconciliationService>,
    pub summary: Arc<SummaryObserver>,
}

pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let client = Arc::new(
        ApiClient::new(&config.api_base_url, config.request_timeout)
            .with_context(|| format!("Invalid API base URL '{}'", config.api_base_url))?,
    );

    let quote_provider: Option<Arc<dyn QuoteProvider>> = match &config.brapi_token {
        Some(token) => Some(Arc::new(BrapiProvider::with_base_url(
            token.clone(),
            config.brapi_base_url.clone(),
            config.request_timeout,
        ))),
        None => {
            tracing::info!("CARTEIRA_BRAPI_TOKEN not set; quotes are disabled");
            None
        }
    };

    let store = Arc::new(PortfolioStore::new());
    let summary = Arc::new(SummaryObserver::new());
    store.subscribe(summary.clone());

    let asset_service = Arc::new(
        AssetService::new(
            Arc::new(HttpAssetRepository::new(client.clone())),
            quote_provider,
            store.clone(),
        )
        .with_keep_data_integrity(config.keep_data_integrity),
    );
    let reconciliation_service = Arc::new(ReconciliationService::new(
        Arc::new(HttpPortfolioRepository::new(client)),
        store,
    ));

    Ok(AppState {
        asset_service,
        reconciliation_service,
        summary,
    })
}
