//! Filesystem fetcher
//!
//! Resolves resource paths against a static root directory, the same layout
//! the server publishes. Used by the CLI and the server's own health checks.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::error::{DataError, DataResult};
use super::fetch::{Fetch, FetchResponse};

/// Fetcher reading files below a root directory
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a resource path to a file below the root. Paths that try to leave
    /// the root resolve to nothing.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(resolved)
    }
}

#[async_trait]
impl Fetch for FsFetcher {
    async fn get(&self, path: &str) -> DataResult<FetchResponse> {
        let Some(file) = self.resolve(path) else {
            return Ok(FetchResponse::status(404));
        };

        match tokio::fs::read(&file).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse::status(404)),
            Err(e) => Err(DataError::fetch(file.display().to_string(), e)),
        }
    }

    async fn head(&self, path: &str) -> DataResult<u16> {
        let Some(file) = self.resolve(path) else {
            return Ok(404);
        };

        match tokio::fs::metadata(&file).await {
            Ok(meta) if meta.is_file() => Ok(200),
            Ok(_) => Ok(404),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(404),
            Err(e) => Err(DataError::fetch(file.display().to_string(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::DataLoader;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_reads_below_root() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/monthly_data.json"), "{}").unwrap();

        let fetcher = FsFetcher::new(dir.path());
        let response = fetcher.get("/data/monthly_data.json").await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"{}");

        assert_eq!(fetcher.head("/data/monthly_data.json").await.unwrap(), 200);
        assert_eq!(fetcher.head("/data").await.unwrap(), 404);
        assert_eq!(fetcher.get("/data/other.json").await.unwrap().status, 404);
    }

    #[tokio::test]
    async fn test_rejects_parent_traversal() {
        let dir = tempdir().unwrap();
        let fetcher = FsFetcher::new(dir.path().join("public"));
        assert_eq!(fetcher.get("/../secret.json").await.unwrap().status, 404);
        assert_eq!(fetcher.head("/data/../../secret.json").await.unwrap(), 404);
    }

    #[tokio::test]
    async fn test_loader_over_filesystem() {
        let dir = tempdir().unwrap();
        let loader = DataLoader::new(FsFetcher::new(dir.path()));
        assert!(!loader.has_data_configured().await);
        assert!(loader.load_monthly_data().await.is_none());

        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(
            dir.path().join("data/monthly_data.json"),
            r#"{"metadata": {"source": "csv", "fetched_at": "2024-01-15T10:30:00Z", "row_count": 1},
                "data": [{"period": "2024-01", "revenue": 10}]}"#,
        )
        .unwrap();

        assert!(loader.has_data_configured().await);
        let file = loader.load_monthly_data().await.unwrap();
        assert_eq!(file.data[0].period_label(), "2024-01");
    }
}
