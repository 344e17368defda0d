//! Chart Wrapper Component
//!
//! Titled card showing one of loading, error, empty or the chart itself.
//! Every state region has the same fixed height.

use leptos::*;
use tessera::chart::{ChartState, CHART_HEIGHT, DEFAULT_EMPTY_MESSAGE};

/// Card around a chart body
#[component]
pub fn ChartWrapper(
    #[prop(into)]
    title: String,
    #[prop(optional, into)]
    description: MaybeProp<String>,
    #[prop(optional, into)]
    loading: MaybeSignal<bool>,
    #[prop(optional, into)]
    error: MaybeSignal<Option<String>>,
    #[prop(optional, into)]
    empty: MaybeSignal<bool>,
    #[prop(optional, into)]
    empty_message: Option<String>,
    #[prop(optional, into)]
    class: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let error_for_state = error.clone();
    let state = move || ChartState::select(loading.get(), error_for_state.get().as_deref(), empty.get());

    let empty_message = empty_message.unwrap_or_else(|| DEFAULT_EMPTY_MESSAGE.to_string());
    let viewport = format!("height: {}px", CHART_HEIGHT);
    let card_class = match class {
        Some(extra) => format!("rounded-lg border bg-card {}", extra),
        None => "rounded-lg border bg-card".to_string(),
    };

    view! {
        <div class=card_class>
            <div class="px-6 pt-6 pb-2">
                <h3 class="text-lg font-medium">{title}</h3>
                {move || description.get().map(|d| view! {
                    <p class="text-sm text-muted-foreground">{d}</p>
                })}
            </div>
            <div class="px-6 pb-6">
                {move || match state() {
                    ChartState::Loading => view! {
                        <div class="flex items-center justify-center" style=viewport.clone()>
                            <div class="animate-pulse text-muted-foreground">"Loading chart..."</div>
                        </div>
                    }.into_view(),
                    ChartState::Error => view! {
                        <div class="flex items-center justify-center" style=viewport.clone()>
                            <div class="text-destructive text-center">
                                <p class="font-medium">"Failed to load chart"</p>
                                <p class="text-sm text-muted-foreground">{error.get().unwrap_or_default()}</p>
                            </div>
                        </div>
                    }.into_view(),
                    ChartState::Empty => view! {
                        <div
                            class="flex items-center justify-center border-2 border-dashed rounded-lg"
                            style=viewport.clone()
                        >
                            <div class="text-center text-muted-foreground px-4">
                                <p>{empty_message.clone()}</p>
                            </div>
                        </div>
                    }.into_view(),
                    ChartState::Content => view! {
                        <div style=viewport.clone()>{children()}</div>
                    }.into_view(),
                }}
            </div>
        </div>
    }
}
