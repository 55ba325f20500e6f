//! Average-cost accounting for buy and sell operations.
//!
//! [`compute_operation`] is pure: it reads the current position and the
//! history record for a ticker and returns every field the ledger persists,
//! without touching any state.

mod engine;
mod operation_model;

#[cfg(test)]
mod engine_tests;

pub use engine::compute_operation;
pub use operation_model::{Operation, OperationKind, OperationResult};
