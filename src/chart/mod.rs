//! Typed charts
//!
//! Line, bar, area and pie charts over any [`Row`](crate::data::Row) type.
//! Each chart decides its own emptiness, resolves series colors against a
//! palette, and renders through a [`ChartFrame`]. Charts never fetch data
//! or own loading/error state; callers pass those in.
//!
//! # Example
//!
//! ```rust
//! use tessera::chart::{Chart, LineChart, SeriesSpec};
//! use tessera::data::Record;
//!
//! let rows = vec![
//!     Record::new().field("month", "Jan").field("value1", 400).field("value2", 240),
//!     Record::new().field("month", "Feb").field("value1", 300).field("value2", 139),
//! ];
//!
//! let chart = LineChart::new("Line Chart Example", &rows, "month")
//!     .line(SeriesSpec::new("value1").label("Series 1"))
//!     .line(SeriesSpec::new("value2").label("Series 2"))
//!     .description("Trend over time");
//!
//! assert!(!chart.is_empty());
//! let html = chart.render();
//! assert!(html.contains("<svg"));
//! ```

pub mod area;
pub mod bar;
pub mod frame;
pub mod line;
pub mod pie;
pub mod series;
pub mod svg;

pub use area::AreaChart;
pub use bar::BarChart;
pub use frame::{ChartFrame, ChartState};
pub use line::LineChart;
pub use pie::PieChart;
pub use series::{
    format_tooltip_value, resolve_series, ResolvedSeries, SeriesSpec, TickFormatter, ValueFormatter,
};

use std::sync::Arc;
use thiserror::Error;

use crate::palette::ChartColorPalette;

/// Fixed height of the frame viewport, in pixels
pub const CHART_HEIGHT: u32 = 300;

/// Default empty-state message
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available. Configure your data source to see charts.";

/// Shared stack identifier for stacked bars and areas
pub const STACK_ID: &str = "stack";

/// Chart configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// A palette needs at least one color
    #[error("Chart palette must contain at least one color")]
    EmptyPalette,

    /// Unknown chart kind name
    #[error("Unknown chart kind: {0}")]
    UnknownKind(String),
}

/// Result type alias for chart configuration
pub type ChartResult<T> = Result<T, ChartError>;

/// `true` when data is absent or has no rows
pub fn is_empty<R>(data: Option<&[R]>) -> bool {
    data.map_or(true, |rows| rows.is_empty())
}

/// Chart kinds, for configuration and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Area,
    Pie,
}

impl std::str::FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "area" => Ok(ChartKind::Area),
            "pie" | "donut" => Ok(ChartKind::Pie),
            _ => Err(ChartError::UnknownKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Line => write!(f, "line"),
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Area => write!(f, "area"),
            ChartKind::Pie => write!(f, "pie"),
        }
    }
}

/// Options every chart shares
#[derive(Clone, Default)]
pub struct ChartOptions {
    pub title: String,
    pub description: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub empty_message: Option<String>,
    pub class: Option<String>,
    pub format_tooltip: Option<ValueFormatter>,
    pub palette: ChartColorPalette,
}

impl ChartOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Frame for these options; emptiness comes from the chart
    pub fn frame(&self, empty: bool) -> ChartFrame {
        ChartFrame {
            title: self.title.clone(),
            description: self.description.clone(),
            loading: self.loading,
            empty,
            error: self.error.clone(),
            empty_message: self.empty_message.clone(),
            class: self.class.clone(),
        }
    }
}

impl std::fmt::Debug for ChartOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartOptions")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .field("empty_message", &self.empty_message)
            .field("class", &self.class)
            .field("format_tooltip", &self.format_tooltip.is_some())
            .field("palette", &self.palette)
            .finish()
    }
}

/// Behavior shared by the typed charts
pub trait Chart {
    fn options(&self) -> &ChartOptions;

    fn options_mut(&mut self) -> &mut ChartOptions;

    /// Data absent or without rows
    fn is_empty(&self) -> bool;

    /// The chart body as an `<svg>` element
    fn render_svg(&self) -> String;

    fn frame(&self) -> ChartFrame {
        self.options().frame(self.is_empty())
    }

    fn state(&self) -> ChartState {
        self.frame().state()
    }

    /// Frame plus body; the body is only rendered in the content state
    fn render(&self) -> String {
        self.frame().render_html(|| self.render_svg())
    }

    fn description(mut self, description: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().description = Some(description.into());
        self
    }

    fn loading(mut self, loading: bool) -> Self
    where
        Self: Sized,
    {
        self.options_mut().loading = loading;
        self
    }

    fn error(mut self, error: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().error = Some(error.into());
        self
    }

    fn empty_message(mut self, message: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().empty_message = Some(message.into());
        self
    }

    fn class(mut self, class: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().class = Some(class.into());
        self
    }

    fn palette(mut self, palette: ChartColorPalette) -> Self
    where
        Self: Sized,
    {
        self.options_mut().palette = palette;
        self
    }

    /// Format numeric tooltip values
    fn format_tooltip<F>(mut self, format: F) -> Self
    where
        Self: Sized,
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        self.options_mut().format_tooltip = Some(Arc::new(format));
        self
    }

    /// Use an already shared formatter
    fn tooltip_formatter(mut self, format: Option<ValueFormatter>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().format_tooltip = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    #[test]
    fn test_is_empty() {
        let rows: Vec<Record> = Vec::new();
        assert!(is_empty::<Record>(None));
        assert!(is_empty(Some(rows.as_slice())));
        assert!(!is_empty(Some(&[Record::new()][..])));
    }

    #[test]
    fn test_chart_kind_parse() {
        assert_eq!("Line".parse::<ChartKind>(), Ok(ChartKind::Line));
        assert_eq!("donut".parse::<ChartKind>(), Ok(ChartKind::Pie));
        assert_eq!(
            "radar".parse::<ChartKind>(),
            Err(ChartError::UnknownKind("radar".to_string()))
        );
        assert_eq!(ChartKind::Area.to_string(), "area");
    }

    #[test]
    fn test_options_frame() {
        let mut options = ChartOptions::new("Revenue");
        options.error = Some("bad".to_string());
        let frame = options.frame(true);
        assert_eq!(frame.title, "Revenue");
        assert!(frame.empty);
        assert_eq!(frame.state(), ChartState::Error);
    }
}
