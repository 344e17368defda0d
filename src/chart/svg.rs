//! SVG rendering primitives
//!
//! Pure string builders shared by the typed charts. Output is a
//! self-contained `<svg>` element that scales to its container.

use std::fmt::Write as _;

use crate::data::Row;

/// Drawing surface width (viewBox units)
pub const VIEW_WIDTH: f64 = 600.0;
/// Drawing surface height (viewBox units), same as the frame viewport
pub const VIEW_HEIGHT: f64 = 300.0;

// SVG color constants
const GRID_COLOR: &str = "#E5E7EB";
const AXIS_COLOR: &str = "#9CA3AF";
const TEXT_COLOR: &str = "#6B7280";

/// Number of value-axis intervals
pub const TICK_COUNT: usize = 5;

/// Escape text for HTML/SVG content and attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Compact number for axis ticks: 1200 -> "1.2k", 3000000 -> "3M"
pub fn format_tick(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1_000_000.0 {
        (value / 1_000_000.0, "M")
    } else if abs >= 1_000.0 {
        (value / 1_000.0, "k")
    } else {
        (value, "")
    };
    let text = format!("{:.2}", scaled);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    let text = if text == "-0" { "0" } else { text };
    format!("{}{}", text, suffix)
}

/// Plot area inside the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for Layout {
    fn default() -> Self {
        // Room for value labels on the left, category labels and legend below
        Self {
            left: 56.0,
            top: 12.0,
            right: VIEW_WIDTH - 30.0,
            bottom: VIEW_HEIGHT - 56.0,
        }
    }
}

impl Layout {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Center of band `index` out of `count` along the x axis
    pub fn band_center_x(&self, index: usize, count: usize) -> f64 {
        let band = self.width() / count.max(1) as f64;
        self.left + band * (index as f64 + 0.5)
    }

    /// Center of band `index` out of `count` along the y axis
    pub fn band_center_y(&self, index: usize, count: usize) -> f64 {
        let band = self.height() / count.max(1) as f64;
        self.top + band * (index as f64 + 0.5)
    }

    /// Evenly spaced point positions, edge to edge
    pub fn point_x(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            return self.left + self.width() / 2.0;
        }
        self.left + self.width() * index as f64 / (count - 1) as f64
    }
}

/// Linear value axis that always includes zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    pub min: f64,
    pub max: f64,
}

impl ValueScale {
    /// Scale covering every value plus zero
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut min: f64 = 0.0;
        let mut max: f64 = 0.0;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if (max - min).abs() < f64::EPSILON {
            max = min + 1.0;
        }
        // Headroom so the largest value doesn't touch the edge
        let pad = (max - min) * 0.05;
        Self {
            min: if min < 0.0 { min - pad } else { min },
            max: max + pad,
        }
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Fraction of the axis covered up to `value`
    pub fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / self.range()
    }

    /// Vertical position of `value` inside `layout`
    pub fn y(&self, layout: &Layout, value: f64) -> f64 {
        layout.bottom - self.fraction(value) * layout.height()
    }

    /// Horizontal position of `value` inside `layout`
    pub fn x(&self, layout: &Layout, value: f64) -> f64 {
        layout.left + self.fraction(value) * layout.width()
    }

    /// Tick values from min to max, inclusive
    pub fn ticks(&self) -> Vec<f64> {
        (0..=TICK_COUNT)
            .map(|i| self.min + self.range() * i as f64 / TICK_COUNT as f64)
            .collect()
    }
}

/// Category labels, one per row
pub fn categories<R: Row>(rows: &[R], key: &str) -> Vec<String> {
    rows.iter()
        .map(|row| row.value(key).map(|v| v.to_string()).unwrap_or_default())
        .collect()
}

/// Plottable values of a field, `None` where a row has no number.
/// Numeric text counts, since sheet exports write every cell as a string.
pub fn numeric_values<R: Row>(rows: &[R], key: &str) -> Vec<Option<f64>> {
    rows.iter()
        .map(|row| row.value(key).and_then(|v| v.as_plot_value()))
        .collect()
}

/// Opening `<svg>` tag
pub fn open(aria_label: &str) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="100%" height="100%" preserveAspectRatio="xMidYMid meet" role="img" aria-label="{}">"##,
        VIEW_WIDTH,
        VIEW_HEIGHT,
        escape(aria_label)
    )
}

pub fn close(svg: &mut String) {
    svg.push_str("</svg>");
}

/// Dashed grid lines across the value axis
pub fn grid(svg: &mut String, layout: &Layout, scale: &ValueScale, horizontal_values: bool) {
    for tick in scale.ticks() {
        if horizontal_values {
            let x = scale.x(layout, tick);
            let _ = write!(
                svg,
                r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-dasharray="3 3"/>"##,
                x, layout.top, x, layout.bottom, GRID_COLOR
            );
        } else {
            let y = scale.y(layout, tick);
            let _ = write!(
                svg,
                r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-dasharray="3 3"/>"##,
                layout.left, y, layout.right, y, GRID_COLOR
            );
        }
    }
}

/// Left and bottom axis lines
pub fn axes(svg: &mut String, layout: &Layout) {
    let _ = write!(
        svg,
        r##"<line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="{c}"/><line x1="{l:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="{c}"/>"##,
        l = layout.left,
        t = layout.top,
        b = layout.bottom,
        r = layout.right,
        c = AXIS_COLOR
    );
}

/// Value tick labels on the left (vertical values) or bottom (horizontal values)
pub fn value_labels(svg: &mut String, layout: &Layout, scale: &ValueScale, horizontal_values: bool) {
    for tick in scale.ticks() {
        if horizontal_values {
            let _ = write!(
                svg,
                r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="{}">{}</text>"##,
                scale.x(layout, tick),
                layout.bottom + 16.0,
                TEXT_COLOR,
                escape(&format_tick(tick))
            );
        } else {
            let _ = write!(
                svg,
                r##"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="11" fill="{}">{}</text>"##,
                layout.left - 6.0,
                scale.y(layout, tick) + 4.0,
                TEXT_COLOR,
                escape(&format_tick(tick))
            );
        }
    }
}

/// Category labels along the bottom axis at the given x positions
pub fn category_labels_x(svg: &mut String, layout: &Layout, labels: &[String], xs: &[f64]) {
    // Thin out labels so they don't overlap on long series
    let step = (labels.len() / 12).max(1);
    for (i, (label, x)) in labels.iter().zip(xs).enumerate() {
        if i % step != 0 {
            continue;
        }
        let _ = write!(
            svg,
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="{}">{}</text>"##,
            x,
            layout.bottom + 16.0,
            TEXT_COLOR,
            escape(label)
        );
    }
}

/// Category labels along the left axis at the given y positions
pub fn category_labels_y(svg: &mut String, layout: &Layout, labels: &[String], ys: &[f64]) {
    let step = (labels.len() / 12).max(1);
    for (i, (label, y)) in labels.iter().zip(ys).enumerate() {
        if i % step != 0 {
            continue;
        }
        let _ = write!(
            svg,
            r##"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="11" fill="{}">{}</text>"##,
            layout.left - 6.0,
            y + 4.0,
            TEXT_COLOR,
            escape(label)
        );
    }
}

/// Axis title under the bottom axis
pub fn x_axis_title(svg: &mut String, layout: &Layout, title: &str) {
    let _ = write!(
        svg,
        r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12" fill="{}">{}</text>"##,
        layout.left + layout.width() / 2.0,
        layout.bottom + 32.0,
        TEXT_COLOR,
        escape(title)
    );
}

/// Rotated axis title beside the left axis
pub fn y_axis_title(svg: &mut String, layout: &Layout, title: &str) {
    let x = 14.0;
    let y = layout.top + layout.height() / 2.0;
    let _ = write!(
        svg,
        r##"<text x="{x:.1}" y="{y:.1}" transform="rotate(-90 {x:.1} {y:.1})" text-anchor="middle" font-size="12" fill="{c}">{t}</text>"##,
        x = x,
        y = y,
        c = TEXT_COLOR,
        t = escape(title)
    );
}

/// Widest slot a legend entry gets
const LEGEND_ITEM_WIDTH: f64 = 110.0;

/// Legend row along the bottom edge. Slots shrink so the row always fits
/// the canvas.
pub fn legend(svg: &mut String, entries: &[(String, String)]) {
    if entries.is_empty() {
        return;
    }
    let item_width = LEGEND_ITEM_WIDTH.min((VIEW_WIDTH - 8.0) / entries.len() as f64);
    let total = item_width * entries.len() as f64;
    let mut x = (VIEW_WIDTH - total) / 2.0;
    let y = VIEW_HEIGHT - 10.0;
    for (label, color) in entries {
        let _ = write!(
            svg,
            r##"<g class="legend-item"><rect x="{:.1}" y="{:.1}" width="10" height="10" rx="2" fill="{}"/><text x="{:.1}" y="{:.1}" font-size="11" fill="{}">{}</text></g>"##,
            x,
            y - 9.0,
            escape(color),
            x + 14.0,
            y,
            TEXT_COLOR,
            escape(label)
        );
        x += item_width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">Tom & 'Jerry'</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;");
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(12.5), "12.5");
        assert_eq!(format_tick(1200.0), "1.2k");
        assert_eq!(format_tick(3_000_000.0), "3M");
        assert_eq!(format_tick(-250.0), "-250");
    }

    #[test]
    fn test_scale_includes_zero() {
        let scale = ValueScale::from_values([10.0, 20.0]);
        assert_eq!(scale.min, 0.0);
        assert!(scale.max >= 20.0);

        let scale = ValueScale::from_values([-5.0, 5.0]);
        assert!(scale.min < -5.0);
        assert!(scale.max > 5.0);
    }

    #[test]
    fn test_scale_flat_values() {
        let scale = ValueScale::from_values(std::iter::empty());
        assert!(scale.range() > 0.0);
        let scale = ValueScale::from_values([0.0, 0.0]);
        assert!(scale.range() > 0.0);
    }

    #[test]
    fn test_scale_positions() {
        let layout = Layout::default();
        let scale = ValueScale { min: 0.0, max: 100.0 };
        assert_eq!(scale.y(&layout, 0.0), layout.bottom);
        assert_eq!(scale.y(&layout, 100.0), layout.top);
        assert_eq!(scale.x(&layout, 50.0), layout.left + layout.width() / 2.0);
        assert_eq!(scale.ticks().len(), TICK_COUNT + 1);
    }

    #[test]
    fn test_layout_points() {
        let layout = Layout::default();
        assert_eq!(layout.point_x(0, 3), layout.left);
        assert_eq!(layout.point_x(2, 3), layout.right);
        assert_eq!(layout.point_x(0, 1), layout.left + layout.width() / 2.0);
    }

    #[test]
    fn test_row_extraction() {
        let rows = vec![
            Record::new().field("month", "Jan").field("v", 1),
            Record::new().field("month", "Feb").field("v", "n/a"),
            Record::new().field("v", 3),
        ];
        assert_eq!(categories(&rows, "month"), vec!["Jan", "Feb", ""]);
        assert_eq!(numeric_values(&rows, "v"), vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn test_numeric_text_is_plotted() {
        let rows = vec![
            Record::new().field("v", "1200"),
            Record::new().field("v", " 1500.5 "),
            Record::new().field("v", "n/a"),
        ];
        assert_eq!(numeric_values(&rows, "v"), vec![Some(1200.0), Some(1500.5), None]);
    }

    #[test]
    fn test_legend_fits_canvas() {
        let entries: Vec<(String, String)> = (0..8)
            .map(|i| (format!("Series {}", i), "#000".to_string()))
            .collect();
        let mut out = String::new();
        legend(&mut out, &entries);

        let xs: Vec<f64> = out
            .match_indices("<rect x=\"")
            .map(|(i, m)| {
                let rest = &out[i + m.len()..];
                rest[..rest.find('"').unwrap_or(0)].parse().unwrap_or(f64::NAN)
            })
            .collect();
        assert_eq!(xs.len(), 8);
        let slot = (VIEW_WIDTH - 8.0) / 8.0;
        assert!(xs.iter().all(|x| *x >= 0.0 && x + slot <= VIEW_WIDTH));

        let mut few = String::new();
        legend(&mut few, &entries[..2]);
        assert!(few.contains("<rect x=\"190.0\""));
    }
}
