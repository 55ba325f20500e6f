//! Keeps the local position history consistent with the backend.

mod reconciliation_model;
mod reconciliation_service;
mod reconciliation_traits;


pub use reconciliation_model::{MovementRecord, OperationOutcome};
pub use reconciliation_service::ReconciliationService;
pub use reconciliation_traits::{PortfolioRepositoryTrait, ReconciliationServiceTrait};
