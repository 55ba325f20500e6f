use std::sync::Arc;

use async_trait::async_trait;
use carteira_core::errors::Result;
use carteira_core::portfolio::{MovementRecord, PortfolioRepositoryTrait, Position};
use tracing::debug;

use super::model::{CarteiraResponse, MovementForm};
use crate::client::ApiClient;
use crate::errors::IntoCore;

const HISTORY_PATH: &str = "/movimentacoes/carteira";
const MOVEMENTS_PATH: &str = "/movimentacoes";

/// Position ledger backed by the REST API.
pub struct HttpPortfolioRepository {
    client: Arc<ApiClient>,
}

impl HttpPortfolioRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for HttpPortfolioRepository {
    async fn get_history(&self) -> Result<Vec<Position>> {
        let response: CarteiraResponse = self.client.get_json(HISTORY_PATH).await.into_core()?;
        let positions = response.into_positions();
        debug!("Fetched {} position history rows", positions.len());
        Ok(positions)
    }

    async fn record_movement(&self, movement: &MovementRecord) -> Result<()> {
        let form = MovementForm::from(movement);
        debug!(
            "Recording {} {} ({}) -> qty {}",
            form.movimento, form.ticker, movement.id, form.qtd_carteira
        );
        self.client
            .post_form_discarding(MOVEMENTS_PATH, &form)
            .await
            .into_core()
    }
}
