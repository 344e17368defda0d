//! Browser fetcher
//!
//! [`Fetch`] over the browser's fetch API via gloo-net. Native builds (unit
//! tests) get a fetcher that always fails, which the loader reads as "not
//! configured".

use async_trait::async_trait;
use tessera::data::{DataError, DataResult, Fetch, FetchResponse};

/// Fetcher for resources on the page's own origin (or a fixed one)
#[derive(Debug, Clone, Default)]
pub struct BrowserFetcher {
    origin: String,
}

impl BrowserFetcher {
    /// Fetch relative to the current page
    pub fn same_origin() -> Self {
        Self::default()
    }

    /// Fetch from another origin, e.g. a dashboard server during development
    pub fn with_origin(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.origin, path.trim_start_matches('/'))
    }
}

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Fetch for BrowserFetcher {
    async fn get(&self, path: &str) -> DataResult<FetchResponse> {
        use gloo_net::http::Request;

        let url = self.url(path);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| DataError::fetch(&url, e))?;

        if !response.ok() {
            return Ok(FetchResponse::status(response.status()));
        }

        let body = response.binary().await.map_err(|e| DataError::fetch(&url, e))?;
        Ok(FetchResponse {
            status: response.status(),
            body,
        })
    }

    async fn head(&self, path: &str) -> DataResult<u16> {
        use gloo_net::http::{Method, RequestBuilder};

        let url = self.url(path);
        let response = RequestBuilder::new(&url)
            .method(Method::HEAD)
            .send()
            .await
            .map_err(|e| DataError::fetch(&url, e))?;
        Ok(response.status())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl Fetch for BrowserFetcher {
    async fn get(&self, path: &str) -> DataResult<FetchResponse> {
        Err(DataError::fetch(self.url(path), "browser fetch requires a wasm32 build"))
    }

    async fn head(&self, path: &str) -> DataResult<u16> {
        Err(DataError::fetch(self.url(path), "browser fetch requires a wasm32 build"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        assert_eq!(BrowserFetcher::same_origin().url("/data/monthly_data.json"), "/data/monthly_data.json");
        assert_eq!(
            BrowserFetcher::with_origin("http://localhost:8084/").url("/data/monthly_data.json"),
            "http://localhost:8084/data/monthly_data.json"
        );
    }
}
