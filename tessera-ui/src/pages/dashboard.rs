//! Dashboard Page
//!
//! Loads the monthly data file once on mount. Until it exists the page shows
//! the setup guide and the example gallery.

use std::rc::Rc;

use leptos::*;
use tessera::chart::SeriesSpec;
use tessera::data::{
    data_age, field_names, DataFile, DataLoader, DataMetadata, MonthlyDataRow, Record, Row,
};

use crate::components::{BarChartCard, DashboardSkeleton, LineChartCard, SetupGuide};
use crate::fetch::BrowserFetcher;
use crate::pages::ExampleGallery;

/// Category field of monthly rows
const PERIOD_KEY: &str = "period";

#[derive(Clone)]
enum DashboardState {
    Loading,
    NotConfigured,
    Loaded(Rc<DataFile<MonthlyDataRow>>),
}

/// Fields with at least one plottable value (numbers or numeric text),
/// excluding the category field
pub fn numeric_fields<R: Row>(rows: &[R], category_key: &str) -> Vec<String> {
    field_names(rows)
        .into_iter()
        .filter(|name| name != category_key)
        .filter(|name| rows.iter().any(|row| row.value(name).is_some_and(|v| v.as_plot_value().is_some())))
        .collect()
}

pub fn records_label(count: u64) -> String {
    if count == 1 {
        "1 record".to_string()
    } else {
        format!("{} records", count)
    }
}

/// Header line: the producer's row count and the data age. A count that
/// disagrees with the rows is reported by `tessera-cli inspect`.
pub fn summary_line(metadata: &DataMetadata) -> String {
    format!(
        "{} loaded · Last updated {}",
        records_label(metadata.row_count),
        data_age(&metadata.fetched_at)
    )
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = create_rw_signal(DashboardState::Loading);

    // Fetch once on mount
    create_effect(move |_| {
        spawn_local(async move {
            let loader = DataLoader::new(BrowserFetcher::same_origin());
            match loader.load_monthly_data().await {
                Some(data) => {
                    web_sys::console::log_1(&format!("Loaded {}", records_label(data.metadata.row_count)).into());
                    state.set(DashboardState::Loaded(Rc::new(data)));
                }
                None => {
                    web_sys::console::info_1(&"No monthly data configured yet".into());
                    state.set(DashboardState::NotConfigured);
                }
            }
        });
    });

    view! {
        <div class="space-y-8">
            {move || match state.get() {
                DashboardState::Loading => view! { <DashboardSkeleton /> }.into_view(),
                DashboardState::NotConfigured => view! {
                    <div class="space-y-8">
                        <div>
                            <h1 class="text-3xl font-bold">"Welcome to Your Dashboard"</h1>
                            <p class="text-muted-foreground mt-1">
                                "Connect a data source to replace the examples below."
                            </p>
                        </div>
                        <SetupGuide />
                        <ExampleGallery />
                    </div>
                }.into_view(),
                DashboardState::Loaded(data) => view! { <LoadedDashboard data=data /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn LoadedDashboard(data: Rc<DataFile<MonthlyDataRow>>) -> impl IntoView {
    let metadata = data.metadata.clone();
    let age = data_age(&metadata.fetched_at);
    let summary = summary_line(&metadata);

    let rows: Vec<Record> = data.data.iter().cloned().map(Record::from).collect();
    let series: Vec<SeriesSpec> = numeric_fields(&rows, PERIOD_KEY)
        .into_iter()
        .map(SeriesSpec::new)
        .collect();
    let rows = Signal::derive(move || rows.clone());

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-muted-foreground mt-1">
                    {summary}
                </p>
            </div>

            <section class="grid gap-4 md:grid-cols-3">
                <OverviewCard label="Total Records" value=metadata.row_count.to_string() />
                <OverviewCard
                    label="Data Source"
                    value=metadata.source.clone()
                    detail=metadata.sheet.clone().unwrap_or_default()
                />
                <OverviewCard label="Last Updated" value=age.clone() />
            </section>

            <section class="grid gap-6 md:grid-cols-2">
                <LineChartCard
                    title="Monthly Trends"
                    description="Every numeric field by period"
                    data=rows
                    x_axis_key=PERIOD_KEY
                    lines=series.clone()
                />
                <BarChartCard
                    title="Monthly Comparison"
                    description="Side-by-side by period"
                    data=rows
                    x_axis_key=PERIOD_KEY
                    bars=series
                />
            </section>
        </div>
    }
}

#[component]
fn OverviewCard(
    #[prop(into)]
    label: String,
    #[prop(into)]
    value: String,
    #[prop(optional, into)]
    detail: String,
) -> impl IntoView {
    view! {
        <div class="rounded-lg border bg-card p-6">
            <p class="text-sm text-muted-foreground">{label}</p>
            <p class="text-2xl font-semibold mt-1 truncate">{value}</p>
            {(!detail.is_empty()).then(|| view! {
                <p class="text-xs text-muted-foreground mt-1">{detail}</p>
            })}
        </div>
    }
}
