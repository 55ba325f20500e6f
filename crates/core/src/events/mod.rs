//! Store events module.
//!
//! Provides the change notifications published by [`crate::store::PortfolioStore`]
//! and the listener trait observers implement to receive them. Every view of the
//! portfolio (visible holdings, summary, asset list) refreshes through this path.

mod listener;
mod store_event;

pub use listener::*;
pub use store_event::*;
