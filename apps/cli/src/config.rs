use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use carteira_market_data::provider::brapi::DEFAULT_BASE_URL as DEFAULT_BRAPI_BASE_URL;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// No quote enrichment when unset.
    pub brapi_token: Option<String>,
    pub brapi_base_url: String,
    pub keep_data_integrity: bool,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = var("CARTEIRA_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.into());
        let brapi_token = var("CARTEIRA_BRAPI_TOKEN");
        let brapi_base_url =
            var("CARTEIRA_BRAPI_BASE_URL").unwrap_or_else(|| DEFAULT_BRAPI_BASE_URL.into());

        let keep_data_integrity = match var("CARTEIRA_KEEP_DATA_INTEGRITY") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| anyhow!("Invalid CARTEIRA_KEEP_DATA_INTEGRITY: '{}'", raw))?,
            None => false,
        };

        let timeout_ms: u64 = match var("CARTEIRA_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid CARTEIRA_REQUEST_TIMEOUT_MS: '{}'", raw))?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let log_format = match var("CARTEIRA_LOG_FORMAT") {
            Some(raw) if raw.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(raw) if raw.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(raw) => return Err(anyhow!("Invalid CARTEIRA_LOG_FORMAT: '{}'", raw)),
            None => LogFormat::Text,
        };

        Ok(Self {
            api_base_url,
            brapi_token,
            brapi_base_url,
            keep_data_integrity,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
