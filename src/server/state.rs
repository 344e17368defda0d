//! Application State
//!
//! Shared state accessible by all handlers.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::data::{DataLoader, FsFetcher};

/// Shared application state for all handlers
pub struct AppState {
    pub config: Arc<Config>,
    /// Loader reading straight from the data directory
    pub loader: DataLoader<FsFetcher>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        // The fetcher is already rooted at the data directory
        let loader = DataLoader::with_base_path(FsFetcher::new(&config.server.data_dir), "");
        Self {
            config: Arc::new(config),
            loader,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn data_dir(&self) -> &Path {
        self.loader.fetcher().root()
    }

    /// Monthly data file name
    pub fn monthly_file(&self) -> &str {
        &self.config.data.monthly_file
    }
}
