//! Tessera dashboard server
//!
//! Run with: cargo run --bin tessera
//!
//! # Configuration
//!
//! Read from `./config.toml`, `$XDG_CONFIG_HOME/tessera/config.toml` or
//! `/etc/tessera/config.toml`, then overridden by environment variables:
//! - `TESSERA_HOST`: Host to bind to (default: 127.0.0.1)
//! - `TESSERA_PORT`: Port to listen on (default: 8084)
//! - `TESSERA_STATIC_ROOT`: Built front end (default: ./tessera-ui/dist)
//! - `TESSERA_DATA_DIR`: Directory holding monthly_data.json (default: ./public/data)
//! - `TESSERA_LOG_LEVEL`, `TESSERA_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Filter directives, wins over the configured level

use anyhow::Context;
use tessera::config::Config;
use tessera::server::{serve, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load_with_env(std::path::Path::new(&path))?,
        None => Config::load_default(),
    };

    tessera::logging::init(&config.logging).context("Failed to initialize logging")?;
    tracing::info!("Starting Tessera v{}", env!("CARGO_PKG_VERSION"));

    // Validate before binding so a bad palette fails fast
    config.charts.palette().context("Invalid [charts] palette")?;

    let state = AppState::new(config);
    if !state.loader.has_file(state.monthly_file()).await {
        tracing::warn!(
            data_dir = %state.data_dir().display(),
            "No {} yet; the dashboard will show its setup guide",
            state.monthly_file()
        );
    }

    serve(state).await?;
    Ok(())
}
