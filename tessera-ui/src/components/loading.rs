//! Loading Component
//!
//! Skeleton states shown while the data file is fetched.

use leptos::*;
use tessera::chart::CHART_HEIGHT;

/// Skeleton loader for cards
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="rounded-lg border bg-card p-6 animate-pulse">
            <div class="h-4 bg-muted rounded w-1/3 mb-4" />
            <div class="h-8 bg-muted rounded w-1/2 mb-2" />
            <div class="h-4 bg-muted rounded w-2/3" />
        </div>
    }
}

/// Skeleton loader for a chart card
#[component]
pub fn ChartSkeleton() -> impl IntoView {
    view! {
        <div class="rounded-lg border bg-card p-6 animate-pulse">
            <div class="h-6 bg-muted rounded w-1/4 mb-4" />
            <div class="bg-muted rounded" style=format!("height: {}px", CHART_HEIGHT) />
        </div>
    }
}

/// Whole-dashboard placeholder
#[component]
pub fn DashboardSkeleton(
    #[prop(default = 3)]
    cards: usize,
) -> impl IntoView {
    view! {
        <div class="space-y-6">
            <div class="grid gap-4 md:grid-cols-3">
                {(0..cards).map(|_| view! { <CardSkeleton /> }).collect_view()}
            </div>
            <ChartSkeleton />
        </div>
    }
}
