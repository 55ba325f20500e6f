//! REST storage implementation for the position ledger.

mod model;
mod repository;

pub use model::{CarteiraResponse, MovementForm, PositionDTO};
pub use repository::HttpPortfolioRepository;
