//! Series configuration
//!
//! A `SeriesSpec` ties one row field to a visual channel. Resolution fills
//! in the label and color defaults against a palette.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::data::{FieldValue, Row};
use crate::palette::ChartColorPalette;

/// Formats numeric tooltip values (e.g. currency)
pub type ValueFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Formats category axis ticks
pub type TickFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// One plotted series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    /// Row field supplying the values
    #[serde(alias = "dataKey")]
    pub data_key: String,
    /// Legend label (defaults to the field name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Explicit color (defaults to the palette color for the series index)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl SeriesSpec {
    pub fn new(data_key: impl Into<String>) -> Self {
        Self {
            data_key: data_key.into(),
            label: None,
            color: None,
        }
    }

    /// Builder method: set the legend label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builder method: set an explicit color
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl From<&str> for SeriesSpec {
    fn from(data_key: &str) -> Self {
        SeriesSpec::new(data_key)
    }
}

/// A series with label and color decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSeries {
    pub data_key: String,
    pub label: String,
    pub color: String,
}

/// Resolve label and color for each series; an explicit color always wins
/// over the palette color for that index
pub fn resolve_series(specs: &[SeriesSpec], palette: &ChartColorPalette) -> Vec<ResolvedSeries> {
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| ResolvedSeries {
            data_key: spec.data_key.clone(),
            label: spec.label.clone().unwrap_or_else(|| spec.data_key.clone()),
            color: spec
                .color
                .clone()
                .unwrap_or_else(|| palette.color_at(index).to_string()),
        })
        .collect()
}

/// Tooltip text for a value: numbers go through the formatter when one is
/// set, anything else passes through unformatted
pub fn format_tooltip_value(value: &FieldValue, formatter: Option<&ValueFormatter>) -> String {
    match (value.as_f64(), formatter) {
        (Some(number), Some(format)) => format(number),
        _ => value.to_string(),
    }
}

/// Tooltip text for a row's field, taken from the raw cell so numeric text
/// is shown as written
pub fn tooltip_text<R: Row>(row: &R, key: &str, formatter: Option<&ValueFormatter>) -> String {
    row.value(key)
        .map(|value| format_tooltip_value(&value, formatter))
        .unwrap_or_default()
}
