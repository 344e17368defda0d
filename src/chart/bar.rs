//! Bar chart
//!
//! Grouped or stacked bars, vertical or horizontal. In stacked mode every
//! series shares one stack (`STACK_ID`); positive and negative values grow
//! away from zero separately.

use std::fmt::Write as _;

use super::series::{resolve_series, tooltip_text, ResolvedSeries, SeriesSpec};
use super::svg::{self, escape, Layout, ValueScale};
use super::{Chart, ChartOptions, STACK_ID};
use crate::data::Row;

/// Share of each category band covered by bars
const BAND_FILL: f64 = 0.8;

/// Multi-series bar chart
#[derive(Clone)]
pub struct BarChart<'a, R> {
    pub options: ChartOptions,
    pub data: Option<&'a [R]>,
    /// Row field supplying the category axis
    pub x_axis_key: String,
    pub bars: Vec<SeriesSpec>,
    pub stacked: bool,
    /// Categories on the vertical axis, values along the horizontal one
    pub horizontal: bool,
}

/// Placement of one bar in viewBox units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub series: usize,
    pub row: usize,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl<'a, R: Row> BarChart<'a, R> {
    pub fn new(title: impl Into<String>, data: &'a [R], x_axis_key: impl Into<String>) -> Self {
        Self {
            options: ChartOptions::new(title),
            data: Some(data),
            x_axis_key: x_axis_key.into(),
            bars: Vec::new(),
            stacked: false,
            horizontal: false,
        }
    }

    pub fn data(mut self, data: Option<&'a [R]>) -> Self {
        self.data = data;
        self
    }

    pub fn bar(mut self, spec: impl Into<SeriesSpec>) -> Self {
        self.bars.push(spec.into());
        self
    }

    pub fn bars(mut self, specs: Vec<SeriesSpec>) -> Self {
        self.bars = specs;
        self
    }

    pub fn stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }

    pub fn horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn series(&self) -> Vec<ResolvedSeries> {
        resolve_series(&self.bars, &self.options.palette)
    }

    /// Stack group of every series, if stacked
    pub fn stack_id(&self) -> Option<&'static str> {
        self.stacked.then_some(STACK_ID)
    }

    fn rows(&self) -> &'a [R] {
        self.data.unwrap_or(&[])
    }

    fn values(&self, series: &[ResolvedSeries]) -> Vec<Vec<Option<f64>>> {
        series
            .iter()
            .map(|s| svg::numeric_values(self.rows(), &s.data_key))
            .collect()
    }

    fn scale(&self, values: &[Vec<Option<f64>>]) -> ValueScale {
        if !self.stacked {
            return ValueScale::from_values(values.iter().flatten().flatten().copied());
        }
        let count = self.rows().len();
        let mut positive = vec![0.0; count];
        let mut negative = vec![0.0; count];
        for points in values {
            for (i, v) in points.iter().enumerate() {
                match v {
                    Some(v) if *v >= 0.0 => positive[i] += v,
                    Some(v) => negative[i] += v,
                    None => {}
                }
            }
        }
        ValueScale::from_values(positive.into_iter().chain(negative))
    }

    /// Bar placement inside `layout`. Non-numeric values produce no bar.
    pub fn rects(&self, layout: &Layout) -> Vec<BarRect> {
        let series = self.series();
        let values = self.values(&series);
        let scale = self.scale(&values);
        self.place(layout, &scale, &values)
    }

    fn place(&self, layout: &Layout, scale: &ValueScale, values: &[Vec<Option<f64>>]) -> Vec<BarRect> {
        let count = self.rows().len();
        let extent = if self.horizontal { layout.height() } else { layout.width() };
        let inner = extent / count.max(1) as f64 * BAND_FILL;
        let size = if self.stacked {
            inner
        } else {
            inner / values.len().max(1) as f64
        };

        let mut positive = vec![0.0; count];
        let mut negative = vec![0.0; count];
        let mut rects = Vec::new();

        for (series, points) in values.iter().enumerate() {
            for (row, value) in points.iter().enumerate() {
                let Some(value) = *value else { continue };

                let (from, to) = if self.stacked {
                    let base = if value >= 0.0 { &mut positive[row] } else { &mut negative[row] };
                    let from = *base;
                    *base += value;
                    (from, *base)
                } else {
                    (0.0, value)
                };

                let center = if self.horizontal {
                    layout.band_center_y(row, count)
                } else {
                    layout.band_center_x(row, count)
                };
                let offset = if self.stacked { 0.0 } else { size * series as f64 };
                let start = center - inner / 2.0 + offset;

                let rect = if self.horizontal {
                    let (a, b) = (scale.x(layout, from), scale.x(layout, to));
                    BarRect { series, row, value, x: a.min(b), y: start, width: (b - a).abs(), height: size }
                } else {
                    let (a, b) = (scale.y(layout, from), scale.y(layout, to));
                    BarRect { series, row, value, x: start, y: a.min(b), width: size, height: (b - a).abs() }
                };
                rects.push(rect);
            }
        }
        rects
    }
}

impl<'a, R: Row> Chart for BarChart<'a, R> {
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
        let values = self.values(&series);
        let categories = svg::categories(rows, &self.x_axis_key);
        let layout = Layout::default();
        let scale = self.scale(&values);

        let mut out = svg::open(&self.options.title);
        svg::grid(&mut out, &layout, &scale, self.horizontal);
        svg::axes(&mut out, &layout);
        svg::value_labels(&mut out, &layout, &scale, self.horizontal);
        if self.horizontal {
            let ys: Vec<f64> = (0..rows.len()).map(|i| layout.band_center_y(i, rows.len())).collect();
            svg::category_labels_y(&mut out, &layout, &categories, &ys);
        } else {
            let xs: Vec<f64> = (0..rows.len()).map(|i| layout.band_center_x(i, rows.len())).collect();
            svg::category_labels_x(&mut out, &layout, &categories, &xs);
        }

        let stack = match self.stack_id() {
            Some(id) => format!(r#" data-stack="{}""#, id),
            None => String::new(),
        };
        let rects = self.place(&layout, &scale, &values);
        for (index, resolved) in series.iter().enumerate() {
            let _ = write!(
                out,
                r##"<g class="series" data-key="{}"{}>"##,
                escape(&resolved.data_key),
                stack
            );
            for rect in rects.iter().filter(|r| r.series == index) {
                let tooltip = tooltip_text(&rows[rect.row], &resolved.data_key, self.options.format_tooltip.as_ref());
                let _ = write!(
                    out,
                    r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="2" fill="{}"><title>{} · {}: {}</title></rect>"##,
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    escape(&resolved.color),
                    escape(categories.get(rect.row).map(String::as_str).unwrap_or_default()),
                    escape(&resolved.label),
                    escape(&tooltip)
                );
            }
            out.push_str("</g>");
        }

        let legend: Vec<(String, String)> = series.iter().map(|s| (s.label.clone(), s.color.clone())).collect();
        svg::legend(&mut out, &legend);
        svg::close(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartState;
    use crate::data::Record;
    use crate::palette::color_at;

    fn rows() -> Vec<Record> {
        vec![
            Record::new().field("category", "Marketing").field("budgeted", 5000).field("actual", 4200),
            Record::new().field("category", "Engineering").field("budgeted", 12000).field("actual", 12800),
        ]
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_grouped_bars_side_by_side() {
        let rows = rows();
        let chart = BarChart::new("Budget", &rows, "category").bar("budgeted").bar("actual");
        let rects = chart.rects(&Layout::default());

        assert_eq!(rects.len(), 4);
        let first = rects.iter().find(|r| r.series == 0 && r.row == 0).unwrap();
        let second = rects.iter().find(|r| r.series == 1 && r.row == 0).unwrap();
        assert!(close(second.x, first.x + first.width));
        // Both start at the zero line
        assert!(close(first.y + first.height, second.y + second.height));
        assert_eq!(chart.stack_id(), None);
    }

    #[test]
    fn test_stacked_bars_share_stack() {
        let rows = rows();
        let chart = BarChart::new("Budget", &rows, "category")
            .bar("budgeted")
            .bar("actual")
            .stacked(true);
        let rects = chart.rects(&Layout::default());

        let lower = rects.iter().find(|r| r.series == 0 && r.row == 1).unwrap();
        let upper = rects.iter().find(|r| r.series == 1 && r.row == 1).unwrap();
        assert!(close(lower.x, upper.x));
        assert!(close(upper.y + upper.height, lower.y));
        assert_eq!(chart.stack_id(), Some(STACK_ID));

        let svg = chart.render_svg();
        assert_eq!(svg.matches(r#"data-stack="stack""#).count(), 2);
    }

    #[test]
    fn test_horizontal_swaps_axes() {
        let rows = rows();
        let chart = BarChart::new("Budget", &rows, "category")
            .bar("budgeted")
            .bar("actual")
            .stacked(true)
            .horizontal(true);
        let layout = Layout::default();
        let rects = chart.rects(&layout);

        let left = rects.iter().find(|r| r.series == 0 && r.row == 0).unwrap();
        let right = rects.iter().find(|r| r.series == 1 && r.row == 0).unwrap();
        assert!(close(left.x, layout.left));
        assert!(close(right.x, left.x + left.width));
        assert!(close(left.y, right.y));
    }

    #[test]
    fn test_colors_and_tooltips() {
        let rows = rows();
        let chart = BarChart::new("Budget", &rows, "category")
            .bar(SeriesSpec::new("budgeted").label("Budgeted"))
            .bar("actual")
            .format_tooltip(|v| format!("${:.0}", v));
        let svg = chart.render();

        assert_eq!(chart.state(), ChartState::Content);
        assert!(svg.contains(color_at(0)));
        assert!(svg.contains(color_at(1)));
        assert!(svg.contains("Marketing · Budgeted: $5000"));
        assert!(svg.contains("Engineering · actual: $12800"));
    }

    #[test]
    fn test_missing_values_skipped() {
        let rows = vec![
            Record::new().field("category", "A").field("v", 1),
            Record::new().field("category", "B"),
        ];
        let chart = BarChart::new("Sparse", &rows, "category").bar("v");
        assert_eq!(chart.rects(&Layout::default()).len(), 1);
    }

    #[test]
    fn test_error_state_without_body() {
        let rows = rows();
        let html = BarChart::new("Budget", &rows, "category")
            .bar("budgeted")
            .error("Sheet not found")
            .render();
        assert!(html.contains("Failed to load chart"));
        assert!(!html.contains("<rect"));
    }
}
