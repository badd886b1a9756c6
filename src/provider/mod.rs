//! Upstream data provider.
//!
//! Weather JSON, scraped pages and map images all come through
//! `DataProvider`. Failures of any kind collapse to `None`: callers treat
//! that as "data unavailable" without distinguishing the cause.

pub mod weather;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

pub use weather::WeatherApi;

#[async_trait]
pub trait DataProvider: Send + Sync {
    /// GET `url` with query `params` and decode the body as JSON.
    async fn fetch_json(&self, url: &str, params: &[(&str, String)]) -> Option<Value>;

    /// GET `url` as text (HTML pages).
    async fn fetch_text(&self, url: &str) -> Option<String>;

    /// GET `url` as raw bytes (map images).
    async fn fetch_bytes(&self, url: &str) -> Option<Vec<u8>>;
}

/// Reasons a fetch failed; only ever logged.
#[derive(Debug, Error)]
enum ProviderError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("upstream returned {0}")]
    Status(reqwest::StatusCode),
}

/// `reqwest` backed provider.
#[derive(Clone)]
pub struct HttpProvider {
    client: HttpClient,
}

impl HttpProvider {
    pub fn new(timeout: Duration) -> Self {
        let client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| HttpClient::new());
        Self { client }
    }

    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<reqwest::Response, ProviderError> {
        let response = self.client.get(url).query(params).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }
        Ok(response)
    }
}

#[async_trait]
impl DataProvider for HttpProvider {
    async fn fetch_json(&self, url: &str, params: &[(&str, String)]) -> Option<Value> {
        let result = async { Ok::<_, ProviderError>(self.get(url, params).await?.json::<Value>().await?) }.await;
        result.map_err(|e| warn!(url, "JSON request failed: {}", e)).ok()
    }

    async fn fetch_text(&self, url: &str) -> Option<String> {
        let result = async { Ok::<_, ProviderError>(self.get(url, &[]).await?.text().await?) }.await;
        result.map_err(|e| warn!(url, "Page request failed: {}", e)).ok()
    }

    async fn fetch_bytes(&self, url: &str) -> Option<Vec<u8>> {
        let result = async { Ok::<_, ProviderError>(self.get(url, &[]).await?.bytes().await?) }.await;
        result
            .map(|bytes| bytes.to_vec())
            .map_err(|e| warn!(url, "Download failed: {}", e))
            .ok()
    }
}
