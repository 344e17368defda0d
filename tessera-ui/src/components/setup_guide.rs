//! Setup Guide
//!
//! Shown until a monthly data file has been published.

use leptos::*;
use tessera::data::{DATA_BASE_PATH, MONTHLY_DATA_FILE};

/// One numbered setup step
#[derive(Debug, Clone, PartialEq)]
pub struct SetupStep {
    pub title: &'static str,
    pub detail: String,
}

/// Steps from a fresh fork to a populated dashboard
pub fn setup_steps() -> Vec<SetupStep> {
    vec![
        SetupStep {
            title: "Configure the data pipeline",
            detail: "Point the pipeline at the client's spreadsheet and name the sheet to export.".to_string(),
        },
        SetupStep {
            title: "Run the pipeline",
            detail: format!(
                "It writes {} with metadata and one row per period.",
                MONTHLY_DATA_FILE
            ),
        },
        SetupStep {
            title: "Publish the data file",
            detail: format!(
                "Copy it into the server's data directory (TESSERA_DATA_DIR) so it is served at {}/{}.",
                DATA_BASE_PATH, MONTHLY_DATA_FILE
            ),
        },
        SetupStep {
            title: "Verify",
            detail: "Run `tessera-cli status`, then reload this page.".to_string(),
        },
    ]
}

#[component]
pub fn SetupGuide() -> impl IntoView {
    view! {
        <div class="rounded-lg border bg-card p-6">
            <h2 class="text-xl font-semibold mb-1">"Get started"</h2>
            <p class="text-sm text-muted-foreground mb-4">
                "No data has been configured yet. Follow these steps to connect this dashboard."
            </p>
            <ol class="space-y-3">
                {setup_steps()
                    .into_iter()
                    .enumerate()
                    .map(|(i, step)| view! {
                        <li class="flex gap-3">
                            <span class="flex h-6 w-6 shrink-0 items-center justify-center rounded-full bg-primary text-primary-foreground text-sm">
                                {i + 1}
                            </span>
                            <div>
                                <p class="font-medium">{step.title}</p>
                                <p class="text-sm text-muted-foreground">{step.detail}</p>
                            </div>
                        </li>
                    })
                    .collect_view()}
            </ol>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_name_the_data_file() {
        let steps = setup_steps();
        assert_eq!(steps.len(), 4);
        assert!(steps[2].detail.contains("/data/monthly_data.json"));
        assert!(steps[3].detail.contains("tessera-cli status"));
    }
}
