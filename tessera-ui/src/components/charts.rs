//! Chart Cards
//!
//! Line, bar, area and pie charts inside a [`ChartWrapper`]. The SVG body
//! comes from the `tessera` chart types and is re-rendered whenever the row
//! signal changes. Colors come from the palette in context.

use leptos::*;
use tessera::chart::{AreaChart, BarChart, Chart, LineChart, PieChart, SeriesSpec, ValueFormatter};
use tessera::data::Record;
use tessera::palette::ChartColorPalette;

use super::ChartWrapper;

/// Palette provided by the app root, or the default one
pub fn use_palette() -> ChartColorPalette {
    use_context::<ChartColorPalette>().unwrap_or_default()
}

#[component]
fn SvgBody(svg: Signal<String>) -> impl IntoView {
    view! { <div class="w-full h-full" inner_html=move || svg.get() /> }
}

/// Line chart card
#[component]
pub fn LineChartCard(
    #[prop(into)]
    title: String,
    #[prop(optional, into)]
    description: MaybeProp<String>,
    #[prop(into)]
    data: Signal<Vec<Record>>,
    #[prop(into)]
    x_axis_key: String,
    lines: Vec<SeriesSpec>,
    #[prop(optional, into)]
    loading: MaybeSignal<bool>,
    #[prop(optional, into)]
    error: MaybeSignal<Option<String>>,
    #[prop(optional)]
    format_tooltip: Option<ValueFormatter>,
    #[prop(optional, into)]
    x_axis_label: Option<String>,
    #[prop(optional, into)]
    y_axis_label: Option<String>,
) -> impl IntoView {
    let palette = use_palette();
    let svg = Signal::derive(move || {
        data.with(|rows| {
            let mut chart = LineChart::new("", rows, x_axis_key.clone())
                .lines(lines.clone())
                .tooltip_formatter(format_tooltip.clone())
                .palette(palette.clone());
            if let Some(label) = &x_axis_label {
                chart = chart.x_axis_label(label.clone());
            }
            if let Some(label) = &y_axis_label {
                chart = chart.y_axis_label(label.clone());
            }
            chart.render_svg()
        })
    });
    let empty = Signal::derive(move || data.with(Vec::is_empty));

    view! {
        <ChartWrapper title=title description=description loading=loading error=error empty=empty>
            <SvgBody svg=svg />
        </ChartWrapper>
    }
}

/// Bar chart card
#[component]
pub fn BarChartCard(
    #[prop(into)]
    title: String,
    #[prop(optional, into)]
    description: MaybeProp<String>,
    #[prop(into)]
    data: Signal<Vec<Record>>,
    #[prop(into)]
    x_axis_key: String,
    bars: Vec<SeriesSpec>,
    #[prop(optional)]
    stacked: bool,
    #[prop(optional)]
    horizontal: bool,
    #[prop(optional, into)]
    loading: MaybeSignal<bool>,
    #[prop(optional, into)]
    error: MaybeSignal<Option<String>>,
    #[prop(optional)]
    format_tooltip: Option<ValueFormatter>,
) -> impl IntoView {
    let palette = use_palette();
    let svg = Signal::derive(move || {
        data.with(|rows| {
            BarChart::new("", rows, x_axis_key.clone())
                .bars(bars.clone())
                .stacked(stacked)
                .horizontal(horizontal)
                .tooltip_formatter(format_tooltip.clone())
                .palette(palette.clone())
                .render_svg()
        })
    });
    let empty = Signal::derive(move || data.with(Vec::is_empty));

    view! {
        <ChartWrapper title=title description=description loading=loading error=error empty=empty>
            <SvgBody svg=svg />
        </ChartWrapper>
    }
}

/// Area chart card
#[component]
pub fn AreaChartCard(
    #[prop(into)]
    title: String,
    #[prop(optional, into)]
    description: MaybeProp<String>,
    #[prop(into)]
    data: Signal<Vec<Record>>,
    #[prop(into)]
    x_axis_key: String,
    areas: Vec<SeriesSpec>,
    #[prop(optional)]
    stacked: bool,
    #[prop(optional, into)]
    loading: MaybeSignal<bool>,
    #[prop(optional, into)]
    error: MaybeSignal<Option<String>>,
    #[prop(optional)]
    format_tooltip: Option<ValueFormatter>,
) -> impl IntoView {
    let palette = use_palette();
    let svg = Signal::derive(move || {
        data.with(|rows| {
            AreaChart::new("", rows, x_axis_key.clone())
                .areas(areas.clone())
                .stacked(stacked)
                .tooltip_formatter(format_tooltip.clone())
                .palette(palette.clone())
                .render_svg()
        })
    });
    let empty = Signal::derive(move || data.with(Vec::is_empty));

    view! {
        <ChartWrapper title=title description=description loading=loading error=error empty=empty>
            <SvgBody svg=svg />
        </ChartWrapper>
    }
}

/// Pie or donut chart card
#[component]
pub fn PieChartCard(
    #[prop(into)]
    title: String,
    #[prop(optional, into)]
    description: MaybeProp<String>,
    #[prop(into)]
    data: Signal<Vec<Record>>,
    #[prop(into)]
    data_key: String,
    #[prop(into)]
    name_key: String,
    #[prop(optional)]
    donut: bool,
    #[prop(optional, into)]
    loading: MaybeSignal<bool>,
    #[prop(optional, into)]
    error: MaybeSignal<Option<String>>,
    #[prop(optional)]
    format_tooltip: Option<ValueFormatter>,
) -> impl IntoView {
    let palette = use_palette();
    let svg = Signal::derive(move || {
        data.with(|rows| {
            PieChart::new("", rows, data_key.clone(), name_key.clone())
                .donut(donut)
                .tooltip_formatter(format_tooltip.clone())
                .palette(palette.clone())
                .render_svg()
        })
    });
    let empty = Signal::derive(move || data.with(Vec::is_empty));

    view! {
        <ChartWrapper title=title description=description loading=loading error=error empty=empty>
            <SvgBody svg=svg />
        </ChartWrapper>
    }
}
