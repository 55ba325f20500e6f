//! Data models returned by quote providers.

mod asset_quote;

pub use asset_quote::AssetQuote;
