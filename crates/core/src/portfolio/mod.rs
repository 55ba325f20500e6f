//! Portfolio module - positions, the accounting engine, the ledger and its
//! reconciliation with the backend, and summary reporting.

pub mod accounting;
pub mod ledger;
pub mod positions;
pub mod reconciliation;
pub mod summary;

pub use accounting::{compute_operation, Operation, OperationKind, OperationResult};
pub use ledger::PositionLedger;
pub use positions::{PortfolioHolding, Position};
pub use reconciliation::{
    MovementRecord, OperationOutcome, PortfolioRepositoryTrait, ReconciliationService,
    ReconciliationServiceTrait,
};
pub use summary::{compute_summary, AllocationSlice, PortfolioSummary, SummaryObserver};
