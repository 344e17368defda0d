//! Chart Frame
//!
//! The titled card around every chart. It shows exactly one of four states,
//! in precedence order: loading, error, empty, content. Title and description
//! are always shown and every state region has the same fixed height, so the
//! layout doesn't jump between transitions.

use std::fmt::Write as _;

use super::svg::escape;
use super::{CHART_HEIGHT, DEFAULT_EMPTY_MESSAGE};

/// Which region the frame shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    Loading,
    Error,
    Empty,
    Content,
}

impl ChartState {
    /// Pick the state. Loading suppresses error and empty; an error
    /// suppresses empty. A blank error string counts as no error.
    pub fn select(loading: bool, error: Option<&str>, empty: bool) -> Self {
        if loading {
            ChartState::Loading
        } else if error.is_some_and(|e| !e.is_empty()) {
            ChartState::Error
        } else if empty {
            ChartState::Empty
        } else {
            ChartState::Content
        }
    }
}

/// Inputs of the frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartFrame {
    pub title: String,
    pub description: Option<String>,
    pub loading: bool,
    pub empty: bool,
    pub error: Option<String>,
    pub empty_message: Option<String>,
    pub class: Option<String>,
}

impl ChartFrame {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn empty(mut self, empty: bool) -> Self {
        self.empty = empty;
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn state(&self) -> ChartState {
        ChartState::select(self.loading, self.error.as_deref(), self.empty)
    }

    /// Message shown in the empty state
    pub fn empty_message_text(&self) -> &str {
        self.empty_message.as_deref().unwrap_or(DEFAULT_EMPTY_MESSAGE)
    }

    /// Render the card. `body` is only called in the content state; the frame
    /// never looks inside what it returns.
    pub fn render_html<F: FnOnce() -> String>(&self, body: F) -> String {
        let mut html = String::new();
        let class = match &self.class {
            Some(extra) => format!("chart-card rounded-lg border bg-card {}", escape(extra)),
            None => "chart-card rounded-lg border bg-card".to_string(),
        };
        let state = self.state();

        let _ = write!(
            html,
            r#"<div class="{}" data-state="{}"><div class="chart-header pb-2"><h3 class="text-lg font-medium">{}</h3>"#,
            class,
            state_name(state),
            escape(&self.title)
        );
        if let Some(description) = &self.description {
            let _ = write!(
                html,
                r#"<p class="text-sm text-muted-foreground">{}</p>"#,
                escape(description)
            );
        }
        html.push_str(r#"</div><div class="chart-content">"#);

        let viewport = format!("height: {}px", CHART_HEIGHT);
        match state {
            ChartState::Loading => {
                let _ = write!(
                    html,
                    r#"<div class="flex items-center justify-center" style="{}"><div class="animate-pulse text-muted-foreground">Loading chart...</div></div>"#,
                    viewport
                );
            }
            ChartState::Error => {
                let _ = write!(
                    html,
                    r#"<div class="flex items-center justify-center" style="{}"><div class="text-destructive text-center"><p class="font-medium">Failed to load chart</p><p class="text-sm text-muted-foreground">{}</p></div></div>"#,
                    viewport,
                    escape(self.error.as_deref().unwrap_or_default())
                );
            }
            ChartState::Empty => {
                let _ = write!(
                    html,
                    r#"<div class="flex items-center justify-center border-2 border-dashed rounded-lg" style="{}"><div class="text-center text-muted-foreground px-4"><p>{}</p></div></div>"#,
                    viewport,
                    escape(self.empty_message_text())
                );
            }
            ChartState::Content => {
                let _ = write!(html, r#"<div style="{}">{}</div>"#, viewport, body());
            }
        }

        html.push_str("</div></div>");
        html
    }
}

fn state_name(state: ChartState) -> &'static str {
    match state {
        ChartState::Loading => "loading",
        ChartState::Error => "error",
        ChartState::Empty => "empty",
        ChartState::Content => "content",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_precedence() {
        for error in [None, Some("X")] {
            for empty in [false, true] {
                assert_eq!(ChartState::select(true, error, empty), ChartState::Loading);
            }
        }
        assert_eq!(ChartState::select(false, Some("X"), true), ChartState::Error);
        assert_eq!(ChartState::select(false, Some("X"), false), ChartState::Error);
        assert_eq!(ChartState::select(false, None, true), ChartState::Empty);
        assert_eq!(ChartState::select(false, None, false), ChartState::Content);
    }

    #[test]
    fn test_blank_error_is_ignored() {
        assert_eq!(ChartState::select(false, Some(""), false), ChartState::Content);
        assert_eq!(ChartState::select(false, Some(""), true), ChartState::Empty);
    }

    #[test]
    fn test_loading_markup() {
        let html = ChartFrame::new("Revenue")
            .description("Monthly")
            .loading(true)
            .error("boom")
            .render_html(|| panic!("body must not render while loading"));

        assert!(html.contains("Revenue"));
        assert!(html.contains("Monthly"));
        assert!(html.contains("Loading chart..."));
        assert!(!html.contains("boom"));
        assert!(html.contains(r#"data-state="loading""#));
    }

    #[test]
    fn test_error_markup() {
        let html = ChartFrame::new("Revenue")
            .empty(true)
            .error("Sheet <3> missing")
            .render_html(String::new);

        assert!(html.contains("Failed to load chart"));
        assert!(html.contains("Sheet &lt;3&gt; missing"));
        assert!(!html.contains(DEFAULT_EMPTY_MESSAGE));
    }

    #[test]
    fn test_empty_markup() {
        let html = ChartFrame::new("Revenue").empty(true).render_html(String::new);
        assert!(html.contains(DEFAULT_EMPTY_MESSAGE));

        let html = ChartFrame::new("Revenue")
            .empty(true)
            .empty_message("Nothing yet")
            .render_html(String::new);
        assert!(html.contains("Nothing yet"));
        assert!(!html.contains(DEFAULT_EMPTY_MESSAGE));
    }

    #[test]
    fn test_content_markup_and_fixed_height() {
        let html = ChartFrame::new("Revenue")
            .class("col-span-2")
            .render_html(|| "<svg></svg>".to_string());

        assert!(html.contains("<svg></svg>"));
        assert!(html.contains("col-span-2"));
        assert!(html.contains("height: 300px"));

        for frame in [
            ChartFrame::new("t").loading(true),
            ChartFrame::new("t").error("e"),
            ChartFrame::new("t").empty(true),
        ] {
            assert!(frame.render_html(String::new).contains("height: 300px"));
        }
    }
}
