use super::reconciliation_model::{MovementRecord, OperationOutcome};
use crate::errors::Result;
use crate::portfolio::accounting::Operation;
use crate::portfolio::positions::{PortfolioHolding, Position};

/// Trait defining the contract for the remote position ledger.
#[async_trait::async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    /// Full position history, one entry per ticker.
    async fn get_history(&self) -> Result<Vec<Position>>;
    async fn record_movement(&self, movement: &MovementRecord) -> Result<()>;
}

/// Trait defining the contract for portfolio operations.
#[async_trait::async_trait]
pub trait ReconciliationServiceTrait: Send + Sync {
    fn history(&self) -> Vec<Position>;
    fn visible_portfolio(&self) -> Vec<PortfolioHolding>;
    /// Replaces the local history with the backend's.
    async fn load_history(&self) -> Result<Vec<Position>>;
    async fn apply_operation(&self, operation: Operation) -> Result<OperationOutcome>;
}
