//! Application state shared by the services.
//!
//! The store holds the asset registry and the position history mirror and is
//! the single place listeners subscribe to.

mod portfolio_store;
mod sync_outcome;

#[cfg(test)]
mod portfolio_store_tests;

pub use portfolio_store::{PortfolioStore, StateUpdate, StoreState, SubscriptionId};
pub use sync_outcome::SyncOutcome;
