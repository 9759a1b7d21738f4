use colored::Colorize;
use triage_core::{AppViewModel, BadgeStyle, DropZoneState, ResultView};

const BAR_CELLS: usize = 20;

/// Prints only what changed between two view models.
pub struct ConsoleRenderer {
    color: bool,
    last: AppViewModel,
}

impl ConsoleRenderer {
    /// `initial` is the view the welcome screen already showed.
    pub fn new(color: bool, initial: &AppViewModel) -> Self {
        Self {
            color,
            last: initial.clone(),
        }
    }

    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut lines = Vec::new();
        let last = &self.last;
        let same = |eq: fn(&AppViewModel, &AppViewModel) -> bool| eq(last, view);

        if !same(|a, b| a.drop_zone == b.drop_zone && a.file_name == b.file_name) {
            lines.push(drop_zone_line(view));
        }

        if !same(|a, b| a.text == b.text) {
            lines.push(if view.text.is_empty() {
                "Text box cleared.".to_string()
            } else {
                format!("Text box: {} chars", view.text.chars().count())
            });
        }

        if !same(|a, b| a.busy == b.busy) {
            lines.push(format!("[{}]", view.submit.label));
        }

        let result_changed = !same(|a, b| a.result == b.result);
        if result_changed {
            if let Some(result) = &view.result {
                lines.extend(self.result_lines(result));
            }
        } else if !same(|a, b| a.reply == b.reply) {
            lines.push(format!("Reply: {}", view.reply));
        }

        let raw_toggled = !same(|a, b| a.raw_visible == b.raw_visible);
        if raw_toggled && !view.raw_visible {
            lines.push("Raw response hidden.".to_string());
        }
        if view.raw_visible && (raw_toggled || result_changed) {
            match &view.result {
                Some(result) => lines.extend(result.raw_json.lines().map(ToOwned::to_owned)),
                None => lines.push("Raw response: (nothing yet)".to_string()),
            }
        }

        if !same(|a, b| a.notification == b.notification) {
            if let Some(message) = &view.notification {
                lines.push(self.paint_notice(&format!("» {message}")));
            }
        }

        self.last = view.clone();
        lines
    }

    fn result_lines(&self, result: &ResultView) -> Vec<String> {
        let mut lines = vec![
            String::new(),
            format!("Category:   {}", self.paint_badge(&result.badge.text, result.badge.style)),
            format!(
                "Confidence: {} {}",
                result.confidence.label,
                confidence_bar(result.confidence.percent)
            ),
            format!("Signals:    {}", chips(&result.signals)),
            format!("Overrides:  {}", chips(&result.overrides)),
            "Reply:".to_string(),
        ];
        lines.extend(result.reply.lines().map(|line| format!("  {line}")));
        lines.push(result.meta_line.clone());
        lines.push(String::new());
        lines
    }

    fn paint_badge(&self, text: &str, style: BadgeStyle) -> String {
        if !self.color {
            return text.to_string();
        }
        match style {
            BadgeStyle::Positive => text.green().bold().to_string(),
            BadgeStyle::Neutral => text.yellow().to_string(),
        }
    }

    fn paint_notice(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }
}

fn drop_zone_line(view: &AppViewModel) -> String {
    match (view.drop_zone, &view.file_name) {
        (DropZoneState::DragHover, _) => "Drop zone: release to drop the file".to_string(),
        (DropZoneState::Loaded, Some(name)) => {
            format!("Drop zone: {name} selected (:remove to clear)")
        }
        _ => "Drop zone: drag a .txt/.pdf here (:drop) or pick one (:file)".to_string(),
    }
}

fn chips(items: &[String]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .map(|item| format!("[{item}]"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The meter is drawn within 0..=100 even when the label is not.
fn confidence_bar(percent: Option<i64>) -> String {
    let filled = percent.unwrap_or(0).clamp(0, 100) as usize * BAR_CELLS / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_CELLS - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use triage_core::{update, AppState, FileHandle, Msg};

    fn analyzed_state() -> AppState {
        let (state, _) = update(AppState::new(), Msg::TextChanged("refund".to_string()));
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::AnalyzeFinished(Ok(json!({
                "category": "Produtivo",
                "confidence": 0.837,
                "reply": "Hi!\nWe are on it.",
                "meta": { "signals": ["urgency", "refund"] }
            }))),
        );
        state
    }

    #[test]
    fn unchanged_view_prints_nothing() {
        let view = AppState::new().view();
        let mut renderer = ConsoleRenderer::new(false, &view);
        assert!(renderer.render(&view).is_empty());
    }

    #[test]
    fn result_panel_is_printed_once() {
        let mut renderer = ConsoleRenderer::new(false, &AppState::new().view());

        let view = analyzed_state().view();
        let lines = renderer.render(&view);
        assert!(lines.contains(&"Category:   Produtivo".to_string()));
        assert!(lines.contains(&"Confidence: 84% [################....]".to_string()));
        assert!(lines.contains(&"Signals:    [urgency] [refund]".to_string()));
        assert!(lines.contains(&"Overrides:  (none)".to_string()));
        assert!(lines.contains(&"  We are on it.".to_string()));

        assert!(renderer.render(&view).is_empty());
    }

    #[test]
    fn first_file_selection_prints_drop_zone_and_notice() {
        let state = AppState::new();
        let mut renderer = ConsoleRenderer::new(false, &state.view());

        let (state, _) = update(
            state,
            Msg::FilePicked(FileHandle::new("mail.txt", b"hi".to_vec())),
        );
        let lines = renderer.render(&state.view());
        assert_eq!(
            lines,
            vec![
                "Drop zone: mail.txt selected (:remove to clear)".to_string(),
                "» File selected: mail.txt".to_string(),
            ]
        );
    }

    #[test]
    fn first_pasted_line_prints_text_length() {
        let state = AppState::new();
        let mut renderer = ConsoleRenderer::new(false, &state.view());

        let (state, _) = update(state, Msg::TextChanged("hello".to_string()));
        assert_eq!(
            renderer.render(&state.view()),
            vec!["Text box: 5 chars".to_string()]
        );

        let (state, _) = update(state, Msg::TextChanged("hello\nworld".to_string()));
        assert_eq!(
            renderer.render(&state.view()),
            vec!["Text box: 11 chars".to_string()]
        );
    }

    #[test]
    fn raw_toggle_prints_json_then_hides() {
        let state = analyzed_state();
        let mut renderer = ConsoleRenderer::new(false, &state.view());

        let (state, _) = update(state, Msg::ToggleRawClicked);
        let lines = renderer.render(&state.view());
        assert_eq!(lines.first().map(String::as_str), Some("{"));
        assert_eq!(lines.last().map(String::as_str), Some("}"));

        let (state, _) = update(state, Msg::ToggleRawClicked);
        assert_eq!(
            renderer.render(&state.view()),
            vec!["Raw response hidden.".to_string()]
        );
    }

    #[test]
    fn bar_is_clamped_for_drawing() {
        assert_eq!(confidence_bar(Some(150)), format!("[{}]", "#".repeat(20)));
        assert_eq!(confidence_bar(Some(-5)), format!("[{}]", ".".repeat(20)));
        assert_eq!(confidence_bar(None), format!("[{}]", ".".repeat(20)));
    }
}
