//! Line chart
//!
//! One line per series across the category axis. Rows whose value isn't a
//! number leave a gap in that line.

use std::fmt::Write as _;
use std::sync::Arc;

use super::series::{resolve_series, tooltip_text, ResolvedSeries, SeriesSpec, TickFormatter};
use super::svg::{self, escape, Layout, ValueScale};
use super::{Chart, ChartOptions};
use crate::data::Row;

/// Multi-series line chart
#[derive(Clone)]
pub struct LineChart<'a, R> {
    pub options: ChartOptions,
    pub data: Option<&'a [R]>,
    /// Row field supplying the category axis
    pub x_axis_key: String,
    pub lines: Vec<SeriesSpec>,
    pub x_axis_label: Option<String>,
    pub y_axis_label: Option<String>,
    pub format_x_axis: Option<TickFormatter>,
}

impl<'a, R: Row> LineChart<'a, R> {
    pub fn new(title: impl Into<String>, data: &'a [R], x_axis_key: impl Into<String>) -> Self {
        Self {
            options: ChartOptions::new(title),
            data: Some(data),
            x_axis_key: x_axis_key.into(),
            lines: Vec::new(),
            x_axis_label: None,
            y_axis_label: None,
            format_x_axis: None,
        }
    }

    /// Replace the data, possibly with nothing at all
    pub fn data(mut self, data: Option<&'a [R]>) -> Self {
        self.data = data;
        self
    }

    /// Add a series
    pub fn line(mut self, spec: impl Into<SeriesSpec>) -> Self {
        self.lines.push(spec.into());
        self
    }

    /// Replace all series
    pub fn lines(mut self, specs: Vec<SeriesSpec>) -> Self {
        self.lines = specs;
        self
    }

    pub fn x_axis_label(mut self, label: impl Into<String>) -> Self {
        self.x_axis_label = Some(label.into());
        self
    }

    pub fn y_axis_label(mut self, label: impl Into<String>) -> Self {
        self.y_axis_label = Some(label.into());
        self
    }

    /// Format category axis ticks (e.g. "2024-01" -> "Jan")
    pub fn format_x_axis<F>(mut self, format: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.format_x_axis = Some(Arc::new(format));
        self
    }

    /// Series with labels and colors decided
    pub fn series(&self) -> Vec<ResolvedSeries> {
        resolve_series(&self.lines, &self.options.palette)
    }

    fn rows(&self) -> &'a [R] {
        self.data.unwrap_or(&[])
    }
}

impl<'a, R: Row> Chart for LineChart<'a, R> {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn is_empty(&self) -> bool {
        super::is_empty(self.data)
    }

    fn render_svg(&self) -> String {
        let rows = self.rows();
        let series = self.series();
        let categories = svg::categories(rows, &self.x_axis_key);
        let values: Vec<Vec<Option<f64>>> = series
            .iter()
            .map(|s| svg::numeric_values(rows, &s.data_key))
            .collect();

        let layout = Layout::default();
        let scale = ValueScale::from_values(values.iter().flatten().flatten().copied());
        let xs: Vec<f64> = (0..rows.len()).map(|i| layout.point_x(i, rows.len())).collect();
        let tick_labels: Vec<String> = match &self.format_x_axis {
            Some(format) => categories.iter().map(|c| format(c.as_str())).collect(),
            None => categories.clone(),
        };

        let mut out = svg::open(&self.options.title);
        svg::grid(&mut out, &layout, &scale, false);
        svg::axes(&mut out, &layout);
        svg::value_labels(&mut out, &layout, &scale, false);
        svg::category_labels_x(&mut out, &layout, &tick_labels, &xs);
        if let Some(label) = &self.x_axis_label {
            svg::x_axis_title(&mut out, &layout, label);
        }
        if let Some(label) = &self.y_axis_label {
            svg::y_axis_title(&mut out, &layout, label);
        }

        for (resolved, points) in series.iter().zip(&values) {
            let mut path = String::new();
            let mut pen_down = false;
            for (x, value) in xs.iter().zip(points) {
                match value {
                    Some(v) => {
                        let cmd = if pen_down { 'L' } else { 'M' };
                        let _ = write!(path, "{}{:.1},{:.1} ", cmd, x, scale.y(&layout, *v));
                        pen_down = true;
                    }
                    None => pen_down = false,
                }
            }

            let _ = write!(
                out,
                r##"<g class="series" data-key="{}">"##,
                escape(&resolved.data_key)
            );
            if !path.is_empty() {
                let _ = write!(
                    out,
                    r##"<path d="{}" fill="none" stroke="{}" stroke-width="2" stroke-linejoin="round"/>"##,
                    path.trim_end(),
                    escape(&resolved.color)
                );
            }
            for (i, ((x, value), category)) in xs.iter().zip(points).zip(&categories).enumerate() {
                if let Some(v) = value {
                    let tooltip = tooltip_text(&rows[i], &resolved.data_key, self.options.format_tooltip.as_ref());
                    let _ = write!(
                        out,
                        r##"<circle cx="{:.1}" cy="{:.1}" r="4" fill="{}"><title>{} · {}: {}</title></circle>"##,
                        x,
                        scale.y(&layout, *v),
                        escape(&resolved.color),
                        escape(category),
                        escape(&resolved.label),
                        escape(&tooltip)
                    );
                }
            }
            out.push_str("</g>");
        }

        let legend: Vec<(String, String)> = series.iter().map(|s| (s.label.clone(), s.color.clone())).collect();
        svg::legend(&mut out, &legend);
        svg::close(&mut out);
        out
    }
}
