//! Pie and donut chart
//!
//! One slice per row. Unlike the cartesian charts, colors follow the row
//! index rather than a series index.

use std::f64::consts::PI;
use std::fmt::Write as _;

use super::series::tooltip_text;
use super::svg::{self, escape, VIEW_WIDTH};
use super::{Chart, ChartOptions};
use crate::data::Row;

/// Outer radius in viewBox units
pub const OUTER_RADIUS: f64 = 100.0;
/// Inner radius of the donut variant
pub const DONUT_INNER_RADIUS: f64 = 60.0;
/// Gap between slices, in degrees
pub const PADDING_ANGLE: f64 = 2.0;

const CENTER_X: f64 = VIEW_WIDTH / 2.0;
const CENTER_Y: f64 = 130.0;

/// Pie chart over a value field and a name field
#[derive(Clone)]
pub struct PieChart<'a, R> {
    pub options: ChartOptions,
    pub data: Option<&'a [R]>,
    /// Row field supplying slice sizes
    pub data_key: String,
    /// Row field supplying slice names
    pub name_key: String,
    pub donut: bool,
}

/// One drawn slice, angles in radians clockwise from twelve o'clock
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub row: usize,
    pub name: String,
    pub value: f64,
    pub color: String,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl<'a, R: Row> PieChart<'a, R> {
    pub fn new(
        title: impl Into<String>,
        data: &'a [R],
        data_key: impl Into<String>,
        name_key: impl Into<String>,
    ) -> Self {
        Self {
            options: ChartOptions::new(title),
            data: Some(data),
            data_key: data_key.into(),
            name_key: name_key.into(),
            donut: false,
        }
    }

    pub fn data(mut self, data: Option<&'a [R]>) -> Self {
        self.data = data;
        self
    }

    pub fn donut(mut self, donut: bool) -> Self {
        self.donut = donut;
        self
    }

    pub fn inner_radius(&self) -> f64 {
        if self.donut {
            DONUT_INNER_RADIUS
        } else {
            0.0
        }
    }

    pub fn outer_radius(&self) -> f64 {
        OUTER_RADIUS
    }

    fn rows(&self) -> &'a [R] {
        self.data.unwrap_or(&[])
    }

    /// Color of every row, by row index
    pub fn slice_colors(&self) -> Vec<String> {
        (0..self.rows().len())
            .map(|i| self.options.palette.color_at(i).to_string())
            .collect()
    }

    /// Slices for rows with a positive value. Rows without one keep their
    /// index, so colors stay attached to the same row.
    pub fn slices(&self) -> Vec<Slice> {
        let rows = self.rows();
        let values = svg::numeric_values(rows, &self.data_key);
        let names = svg::categories(rows, &self.name_key);
        let total: f64 = values.iter().flatten().filter(|v| **v > 0.0).sum();
        if total <= 0.0 {
            return Vec::new();
        }

        let drawn = values.iter().flatten().filter(|v| **v > 0.0).count();
        let padding = if drawn > 1 { PADDING_ANGLE.to_radians() } else { 0.0 };
        let available = 2.0 * PI - padding * drawn as f64;

        let mut angle = 0.0;
        let mut slices = Vec::with_capacity(drawn);
        for (row, value) in values.into_iter().enumerate() {
            let Some(value) = value.filter(|v| *v > 0.0) else { continue };
            let sweep = available * value / total;
            slices.push(Slice {
                row,
                name: names[row].clone(),
                value,
                color: self.options.palette.color_at(row).to_string(),
                start_angle: angle,
                end_angle: angle + sweep,
            });
            angle += sweep + padding;
        }
        slices
    }

    fn slice_path(&self, slice: &Slice) -> String {
        let outer = self.outer_radius();
        let inner = self.inner_radius();
        let sweep = slice.end_angle - slice.start_angle;

        // A full circle can't be drawn as a single arc
        if sweep >= 2.0 * PI - 1e-9 {
            let ring = |r: f64| {
                format!(
                    "M{:.2},{:.2} A{r:.2},{r:.2} 0 1 1 {:.2},{:.2} A{r:.2},{r:.2} 0 1 1 {:.2},{:.2} Z",
                    CENTER_X,
                    CENTER_Y - r,
                    CENTER_X,
                    CENTER_Y + r,
                    CENTER_X,
                    CENTER_Y - r,
                    r = r
                )
            };
            return if inner > 0.0 {
                format!("{} {}", ring(outer), ring(inner))
            } else {
                ring(outer)
            };
        }

        let large = if sweep > PI { 1 } else { 0 };
        let (ox0, oy0) = point(outer, slice.start_angle);
        let (ox1, oy1) = point(outer, slice.end_angle);
        let mut d = String::new();
        if inner > 0.0 {
            let (ix1, iy1) = point(inner, slice.end_angle);
            let (ix0, iy0) = point(inner, slice.start_angle);
            let _ = write!(
                d,
                "M{:.2},{:.2} A{o:.2},{o:.2} 0 {l} 1 {:.2},{:.2} L{:.2},{:.2} A{i:.2},{i:.2} 0 {l} 0 {:.2},{:.2} Z",
                ox0,
                oy0,
                ox1,
                oy1,
                ix1,
                iy1,
                ix0,
                iy0,
                o = outer,
                i = inner,
                l = large
            );
        } else {
            let _ = write!(
                d,
                "M{:.2},{:.2} L{:.2},{:.2} A{o:.2},{o:.2} 0 {l} 1 {:.2},{:.2} Z",
                CENTER_X,
                CENTER_Y,
                ox0,
                oy0,
                ox1,
                oy1,
                o = outer,
                l = large
            );
        }
        d
    }
}

fn point(radius: f64, angle: f64) -> (f64, f64) {
    (CENTER_X + radius * angle.sin(), CENTER_Y - radius * angle.cos())
}

impl<'a, R: Row> Chart for PieChart<'a, R> {
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
        let slices = self.slices();
        let mut out = svg::open(&self.options.title);

        for slice in &slices {
            let tooltip = tooltip_text(&self.rows()[slice.row], &self.data_key, self.options.format_tooltip.as_ref());
            let _ = write!(
                out,
                r##"<path class="slice" d="{}" fill="{}" fill-rule="evenodd" stroke="#FFFFFF" stroke-width="1"><title>{}: {}</title></path>"##,
                self.slice_path(slice),
                escape(&slice.color),
                escape(&slice.name),
                escape(&tooltip)
            );

            // Value label just outside the slice
            let middle = (slice.start_angle + slice.end_angle) / 2.0;
            let (x, y) = point(self.outer_radius() + 14.0, middle);
            let anchor = if x >= CENTER_X { "start" } else { "end" };
            let _ = write!(
                out,
                r##"<text x="{:.1}" y="{:.1}" text-anchor="{}" font-size="11" fill="{}">{}</text>"##,
                x,
                y + 4.0,
                anchor,
                escape(&slice.color),
                escape(&svg::format_tick(slice.value))
            );
        }

        let legend: Vec<(String, String)> = slices.iter().map(|s| (s.name.clone(), s.color.clone())).collect();
        svg::legend(&mut out, &legend);
        svg::close(&mut out);
        out
    }
}
