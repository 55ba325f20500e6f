pub mod decimal_serde;
pub mod decimal_utils;
