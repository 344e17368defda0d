//! HTTP fetcher
//!
//! Reads data files from a running dashboard server with reqwest.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::error::{DataError, DataResult};
use super::fetch::{Fetch, FetchResponse};

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Fetcher for a dashboard served over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    /// Create a fetcher for a base URL (e.g. `http://localhost:8084`)
    pub fn new(base_url: impl Into<String>) -> DataResult<Self> {
        Self::with_timeout(base_url, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    /// Create a fetcher with a custom per-request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> DataResult<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::fetch(base_url.clone(), e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, path: &str) -> DataResult<FetchResponse> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DataError::fetch(&url, e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| DataError::fetch(&url, e))?;

        Ok(FetchResponse {
            status,
            body: body.to_vec(),
        })
    }

    async fn head(&self, path: &str) -> DataResult<u16> {
        let url = self.url(path);
        let response = self
            .client
            .head(&url)
            .send()
            .await
            .map_err(|e| DataError::fetch(&url, e))?;

        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let fetcher = HttpFetcher::new("http://localhost:8084/").unwrap();
        assert_eq!(fetcher.base_url(), "http://localhost:8084");
        assert_eq!(
            fetcher.url("/data/monthly_data.json"),
            "http://localhost:8084/data/monthly_data.json"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) is essentially never listening on localhost
        let fetcher = HttpFetcher::with_timeout("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let result = fetcher.get("/data/monthly_data.json").await;
        assert!(matches!(result, Err(DataError::Fetch { .. })));
    }
}
