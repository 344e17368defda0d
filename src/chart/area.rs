//! Area chart

use std::fmt::Write as _;

use super::series::{resolve_series, tooltip_text, ResolvedSeries, SeriesSpec};
use super::svg::{self, escape, Layout, ValueScale};
use super::{Chart, ChartOptions, STACK_ID};
use crate::data::Row;

/// Fill opacity of every area
pub const FILL_OPACITY: f64 = 0.3;

/// Multi-series area chart, overlapping or stacked
#[derive(Clone)]
pub struct AreaChart<'a, R> {
    pub options: ChartOptions,
    pub data: Option<&'a [R]>,
    pub x_axis_key: String,
    pub areas: Vec<SeriesSpec>,
    pub stacked: bool,
}

/// Value range one series covers at one row: `(low, high)`
pub type Band = (f64, f64);

impl<'a, R: Row> AreaChart<'a, R> {
    pub fn new(title: impl Into<String>, data: &'a [R], x_axis_key: impl Into<String>) -> Self {
        Self {
            options: ChartOptions::new(title),
            data: Some(data),
            x_axis_key: x_axis_key.into(),
            areas: Vec::new(),
            stacked: false,
        }
    }

    pub fn data(mut self, data: Option<&'a [R]>) -> Self {
        self.data = data;
        self
    }

    pub fn area(mut self, spec: impl Into<SeriesSpec>) -> Self {
        self.areas.push(spec.into());
        self
    }

    pub fn areas(mut self, specs: Vec<SeriesSpec>) -> Self {
        self.areas = specs;
        self
    }

    pub fn stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }

    pub fn series(&self) -> Vec<ResolvedSeries> {
        resolve_series(&self.areas, &self.options.palette)
    }

    pub fn stack_id(&self) -> Option<&'static str> {
        self.stacked.then_some(STACK_ID)
    }

    fn rows(&self) -> &'a [R] {
        self.data.unwrap_or(&[])
    }

    /// Per series, per row value bands. Overlapping areas start at zero and
    /// break on non-numeric values; stacked areas sit on the running total,
    /// with missing values contributing nothing.
    pub fn bands(&self) -> Vec<Vec<Option<Band>>> {
        let rows = self.rows();
        let mut totals = vec![0.0; rows.len()];
        self.series()
            .iter()
            .map(|s| {
                svg::numeric_values(rows, &s.data_key)
                    .into_iter()
                    .zip(totals.iter_mut())
                    .map(|(value, total)| {
                        if self.stacked {
                            let low = *total;
                            *total += value.unwrap_or(0.0);
                            Some((low, *total))
                        } else {
                            value.map(|v| (0.0, v))
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

impl<'a, R: Row> Chart for AreaChart<'a, R> {
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
        let bands = self.bands();
        let categories = svg::categories(rows, &self.x_axis_key);
        let layout = Layout::default();
        let scale = ValueScale::from_values(
            bands
                .iter()
                .flatten()
                .flatten()
                .flat_map(|(low, high)| [*low, *high]),
        );
        let xs: Vec<f64> = (0..rows.len()).map(|i| layout.point_x(i, rows.len())).collect();

        let mut out = svg::open(&self.options.title);
        svg::grid(&mut out, &layout, &scale, false);
        svg::axes(&mut out, &layout);
        svg::value_labels(&mut out, &layout, &scale, false);
        svg::category_labels_x(&mut out, &layout, &categories, &xs);

        let stack = match self.stack_id() {
            Some(id) => format!(r#" data-stack="{}""#, id),
            None => String::new(),
        };

        for (resolved, series_bands) in series.iter().zip(&bands) {
            let _ = write!(
                out,
                r##"<g class="series" data-key="{}"{}>"##,
                escape(&resolved.data_key),
                stack
            );
            for run in runs(series_bands) {
                let mut fill = String::new();
                let mut stroke = String::new();
                for (n, &i) in run.iter().enumerate() {
                    let (_, high) = series_bands[i].unwrap_or_default();
                    let cmd = if n == 0 { 'M' } else { 'L' };
                    let point = format!("{:.1},{:.1}", xs[i], scale.y(&layout, high));
                    let _ = write!(fill, "{}{} ", cmd, point);
                    let _ = write!(stroke, "{}{} ", cmd, point);
                }
                for &i in run.iter().rev() {
                    let (low, _) = series_bands[i].unwrap_or_default();
                    let _ = write!(fill, "L{:.1},{:.1} ", xs[i], scale.y(&layout, low));
                }
                fill.push('Z');
                let _ = write!(
                    out,
                    r##"<path d="{}" fill="{c}" fill-opacity="{}" stroke="none"/><path d="{}" fill="none" stroke="{c}" stroke-width="2"/>"##,
                    fill,
                    FILL_OPACITY,
                    stroke.trim_end(),
                    c = escape(&resolved.color)
                );
            }

            let values = svg::numeric_values(rows, &resolved.data_key);
            for (i, band) in series_bands.iter().enumerate() {
                let (Some((_, high)), Some(_)) = (band, values[i]) else { continue };
                let tooltip = tooltip_text(&rows[i], &resolved.data_key, self.options.format_tooltip.as_ref());
                let _ = write!(
                    out,
                    r##"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{}"><title>{} · {}: {}</title></circle>"##,
                    xs[i],
                    scale.y(&layout, *high),
                    escape(&resolved.color),
                    escape(&categories[i]),
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

/// Indices of consecutive present bands
fn runs(bands: &[Option<Band>]) -> Vec<Vec<usize>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, band) in bands.iter().enumerate() {
        if band.is_some() {
            current.push(i);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
