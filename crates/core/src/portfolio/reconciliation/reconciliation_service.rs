use std::sync::Arc;

use log::{debug, error, warn};
use tokio::sync::Mutex;

use super::reconciliation_model::{MovementRecord, OperationOutcome};
use super::reconciliation_traits::{PortfolioRepositoryTrait, ReconciliationServiceTrait};
use crate::assets::normalize_ticker;
use crate::errors::Result;
use crate::events::StoreEvent;
use crate::portfolio::accounting::{compute_operation, Operation};
use crate::portfolio::ledger::PositionLedger;
use crate::portfolio::positions::{PortfolioHolding, Position};
use crate::store::{PortfolioStore, StateUpdate};

/// Applies operations to the position history, persisting them when the
/// backend is reachable and falling back to the local mirror when it is not.
///
/// Each operation runs entirely under one gate: reading the position,
/// computing, persisting, refreshing and notifying never interleave with
/// another operation.
pub struct ReconciliationService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    store: Arc<PortfolioStore>,
    gate: Mutex<()>,
}

impl ReconciliationService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        store: Arc<PortfolioStore>,
    ) -> Self {
        Self {
            portfolio_repository,
            store,
            gate: Mutex::new(()),
        }
    }

    /// Remote history after a successful write, or the local ledger with the
    /// new snapshot when the refresh fails.
    async fn refreshed_history(
        &self,
        mut ledger: PositionLedger,
        snapshot: Position,
    ) -> (Vec<Position>, Option<String>) {
        match self.portfolio_repository.get_history().await {
            Ok(remote) => (PositionLedger::from_history(remote).into_history(), None),
            Err(e) => {
                warn!(
                    "Movement for {} was saved but the history refresh failed: {}",
                    snapshot.ticker, e
                );
                let warning = format!(
                    "{} was saved, but the portfolio could not be reloaded: {}",
                    snapshot.ticker, e
                );
                ledger.upsert(snapshot);
                (ledger.into_history(), Some(warning))
            }
        }
    }
}

#[async_trait::async_trait]
impl ReconciliationServiceTrait for ReconciliationService {
    fn history(&self) -> Vec<Position> {
        self.store.get_state().ledger().into_history()
    }

    fn visible_portfolio(&self) -> Vec<PortfolioHolding> {
        let state = self.store.get_state();
        state.ledger().visible_portfolio(&state)
    }

    async fn load_history(&self) -> Result<Vec<Position>> {
        let _guard = self.gate.lock().await;

        let remote = self.portfolio_repository.get_history().await.map_err(|e| {
            error!("Failed to load portfolio history: {}", e);
            e
        })?;
        let history = PositionLedger::from_history(remote).into_history();

        debug!("Loaded {} history entries", history.len());
        self.store.set_state(
            StateUpdate::history(history.clone()),
            StoreEvent::history_loaded(history.len()),
        );
        Ok(history)
    }

    async fn apply_operation(&self, mut operation: Operation) -> Result<OperationOutcome> {
        operation.ticker = normalize_ticker(&operation.ticker)?;

        let _guard = self.gate.lock().await;

        let ledger = self.store.get_state().ledger();
        let result = compute_operation(
            &operation,
            ledger.current_position(&operation.ticker),
            ledger.record(&operation.ticker),
        )?;

        let movement = MovementRecord::from_result(&result);
        let snapshot = result.to_position();

        let (history, persisted, warning) =
            match self.portfolio_repository.record_movement(&movement).await {
                Ok(()) => {
                    let (history, warning) = self.refreshed_history(ledger, snapshot).await;
                    (history, true, warning)
                }
                Err(e) if e.is_recoverable() => {
                    warn!(
                        "Could not persist {} {} ({}), applying locally only: {}",
                        movement.kind, movement.ticker, movement.id, e
                    );
                    let mut ledger = ledger;
                    ledger.upsert(snapshot);
                    let warning = format!(
                        "{} {} was recorded locally only and will be lost on reload: {}",
                        movement.kind, movement.ticker, e
                    );
                    (ledger.into_history(), false, Some(warning))
                }
                Err(e) => {
                    error!("Movement {} for {} rejected: {}", movement.id, movement.ticker, e);
                    return Err(e);
                }
            };

        self.store.set_state(
            StateUpdate::history(history),
            StoreEvent::operation_applied(&result.ticker, result.kind, persisted),
        );

        Ok(OperationOutcome {
            result,
            persisted,
            warning,
        })
    }
}
