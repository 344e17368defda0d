//! App Root Component
//!
//! Page shell and the chart palette shared through context.

use leptos::*;
use tessera::palette::ChartColorPalette;

use crate::pages::Dashboard;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_context(ChartColorPalette::default());

    view! {
        <div class="min-h-screen bg-background text-foreground flex flex-col">
            <header class="border-b">
                <div class="container mx-auto px-4 py-4 flex items-center justify-between">
                    <span class="text-lg font-semibold">"Tessera"</span>
                    <span class="text-sm text-muted-foreground">
                        {format!("v{}", env!("CARGO_PKG_VERSION"))}
                    </span>
                </div>
            </header>
            <main class="flex-1 container mx-auto px-4 py-8">
                <Dashboard />
            </main>
        </div>
    }
}
