//! Example Gallery
//!
//! Every chart type over fixed sample data, so a fresh fork has something
//! to look at before its data file exists.

use std::sync::Arc;

use leptos::*;
use tessera::chart::{SeriesSpec, ValueFormatter};
use tessera::data::Record;

use crate::components::{AreaChartCard, BarChartCard, LineChartCard, PieChartCard};

/// Six months of two sample series
pub fn example_data() -> Vec<Record> {
    [
        ("Jan", 400, 240),
        ("Feb", 300, 139),
        ("Mar", 520, 380),
        ("Apr", 478, 390),
        ("May", 589, 480),
        ("Jun", 639, 520),
    ]
    .into_iter()
    .map(|(month, value1, value2)| {
        Record::new()
            .field("month", month)
            .field("value1", value1)
            .field("value2", value2)
    })
    .collect()
}

/// Four sample categories for the pie chart
pub fn example_pie_data() -> Vec<Record> {
    [
        ("Category A", 400),
        ("Category B", 300),
        ("Category C", 200),
        ("Category D", 100),
    ]
    .into_iter()
    .map(|(name, value)| Record::new().field("name", name).field("value", value))
    .collect()
}

fn example_series() -> Vec<SeriesSpec> {
    vec![
        SeriesSpec::new("value1").label("Series 1"),
        SeriesSpec::new("value2").label("Series 2"),
    ]
}

#[component]
pub fn ExampleGallery() -> impl IntoView {
    let data = Signal::derive(example_data);
    let pie_data = Signal::derive(example_pie_data);
    let dollars: ValueFormatter = Arc::new(|v: f64| format!("${:.0}", v));

    view! {
        <section class="space-y-4">
            <div>
                <h2 class="text-xl font-semibold">"Example Charts"</h2>
                <p class="text-sm text-muted-foreground">
                    "Sample data. These are replaced by your own charts once data is configured."
                </p>
            </div>
            <div class="grid gap-6 md:grid-cols-2">
                <LineChartCard
                    title="Line Chart"
                    description="Trends over time"
                    data=data
                    x_axis_key="month"
                    lines=example_series()
                />
                <BarChartCard
                    title="Bar Chart"
                    description="Side-by-side comparison"
                    data=data
                    x_axis_key="month"
                    bars=example_series()
                    format_tooltip=dollars
                />
                <AreaChartCard
                    title="Area Chart"
                    description="Stacked totals"
                    data=data
                    x_axis_key="month"
                    areas=example_series()
                    stacked=true
                />
                <PieChartCard
                    title="Pie Chart"
                    description="Share by category"
                    data=pie_data
                    data_key="value"
                    name_key="name"
                    donut=true
                />
            </div>
        </section>
    }
}
