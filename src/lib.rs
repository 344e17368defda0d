//! # Tessera
//!
//! Chart-and-data core for client dashboards: a color palette, typed charts
//! with a shared loading/error/empty/content frame, and a tolerant loader
//! for the JSON data files a sync pipeline publishes.
//!
//! ## Modules
//!
//! - [`palette`]: Series index to color mapping
//! - [`chart`]: Chart frame, line/bar/area/pie charts, SVG rendering
//! - [`data`]: Data file envelope, row types, loader and fetchers
//! - `server`: Axum server for the front end and data files (`native`)
//! - `config`: TOML configuration with environment overrides (`native`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tessera::chart::{BarChart, Chart, SeriesSpec};
//! use tessera::data::{DataLoader, FsFetcher};
//!
//! #[tokio::main]
//! async fn main() {
//!     let loader = DataLoader::new(FsFetcher::new("./public"));
//!
//!     let Some(monthly) = loader.load_monthly_data().await else {
//!         println!("No data yet - run the sync pipeline first");
//!         return;
//!     };
//!
//!     let chart = BarChart::new("Revenue vs Expenses", &monthly.data, "period")
//!         .bar(SeriesSpec::new("revenue").label("Revenue"))
//!         .bar(SeriesSpec::new("expenses").label("Expenses"))
//!         .format_tooltip(|v| format!("${:.0}", v));
//!
//!     println!("{}", chart.render());
//! }
//! ```

pub mod chart;
pub mod data;
pub mod palette;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod server;

// Re-export top-level types for convenience
pub use chart::{
    AreaChart, BarChart, Chart, ChartError, ChartFrame, ChartKind, ChartOptions, ChartResult,
    ChartState, LineChart, PieChart, SeriesSpec,
};

pub use data::{
    data_age, BudgetDataRow, DataError, DataFile, DataLoader, DataMetadata, DataResult, Fetch,
    FieldValue, MonthlyDataRow, Record, Row,
};

pub use palette::{color_at, ChartColorPalette, SemanticColors, DEFAULT_COLORS};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
#[cfg(feature = "native")]
pub use server::{build_router, serve, ApiError, AppState};
