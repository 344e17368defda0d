//! Fetch seam
//!
//! The loader only needs two requests: a GET that returns a body and a
//! HEAD-style existence probe. Native fetchers (HTTP, filesystem) and the
//! browser fetcher in the front end implement this trait.

use async_trait::async_trait;

use super::error::DataResult;

/// Response to a GET
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP-like status code (filesystem fetchers answer 200 or 404)
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal request surface used by the data loader.
///
/// `Err` means the transport failed; a reachable resource that answered with
/// a failure status is `Ok` with that status.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Fetch {
    /// GET a resource path (e.g. `/data/monthly_data.json`)
    async fn get(&self, path: &str) -> DataResult<FetchResponse>;

    /// HEAD a resource path, returning only the status
    async fn head(&self, path: &str) -> DataResult<u16>;
}
