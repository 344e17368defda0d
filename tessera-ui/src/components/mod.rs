//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart_wrapper;
pub mod charts;
pub mod loading;
pub mod setup_guide;

pub use chart_wrapper::ChartWrapper;
pub use charts::{AreaChartCard, BarChartCard, LineChartCard, PieChartCard};
pub use loading::DashboardSkeleton;
pub use setup_guide::SetupGuide;
