//! Aggregate performance figures, always recomputed from the full history.

mod summary_model;
mod summary_service;


pub use summary_model::{AllocationSlice, PortfolioSummary};
pub use summary_service::{compute_summary, SummaryObserver};
