//! Shared HTTP client for the backend API.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::StorageError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body the backend sends on failures, e.g. `{"message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Thin wrapper around `reqwest::Client` bound to the backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://127.0.0.1:5000`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StorageError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| StorageError::InvalidConfig(format!("'{}': {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::InvalidConfig(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StorageError> {
        let body = self.execute(self.request(Method::GET, path)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POSTs a form-encoded body and decodes the JSON response.
    pub async fn post_form<F, T>(&self, path: &str, form: &F) -> Result<T, StorageError>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .execute(self.request(Method::POST, path).form(form))
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POSTs a form-encoded body; any 2xx answer is success, the body is ignored.
    pub async fn post_form_discarding<F>(&self, path: &str, form: &F) -> Result<(), StorageError>
    where
        F: Serialize + ?Sized,
    {
        self.execute(self.request(Method::POST, path).form(form))
            .await
            .map(|_| ())
    }

    pub async fn patch_form<F, T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        form: &F,
    ) -> Result<T, StorageError>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .execute(self.request(Method::PATCH, path).query(query).form(form))
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn delete(&self, path: &str, query: &[(&str, &str)]) -> Result<(), StorageError> {
        self.execute(self.request(Method::DELETE, path).query(query))
            .await
            .map(|_| ())
    }

    async fn execute(&self, request: RequestBuilder) -> Result<String, StorageError> {
        let response = request.send().await.map_err(|e| {
            warn!("Backend request failed: {}", e);
            StorageError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            warn!("Backend answered {}: {}", status, message);
            return Err(StorageError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}
