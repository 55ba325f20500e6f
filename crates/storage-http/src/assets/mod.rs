//! REST storage implementation for the asset registry.

mod model;
mod repository;

pub use model::{AssetDTO, AssetForm, AssetUpdateForm, AtivosResponse};
pub use repository::HttpAssetRepository;
