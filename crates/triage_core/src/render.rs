//! Maps an [`AnalysisResult`] to displayable values.
//!
//! Rendering never fails: each absent field has a placeholder.

use crate::{AnalysisMeta, AnalysisResult};

pub const PLACEHOLDER: &str = "—";
/// Category the classifier uses for emails that need action.
pub const DEFAULT_PRODUCTIVE_LABEL: &str = "Produtivo";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    Positive,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeView {
    pub text: String,
    pub style: BadgeStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfidenceView {
    pub percent: Option<i64>,
    pub label: String,
    /// CSS-style width of the meter, e.g. `"84%"`.
    pub bar_width: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub badge: BadgeView,
    pub confidence: ConfidenceView,
    pub signals: Vec<String>,
    pub overrides: Vec<String>,
    pub reply: String,
    pub meta_line: String,
    pub raw_json: String,
}

pub fn render_result(result: &AnalysisResult, productive_label: &str) -> ResultView {
    let meta = result.meta.as_ref();
    ResultView {
        badge: render_badge(result.category.as_deref(), productive_label),
        confidence: render_confidence(result.confidence),
        signals: meta
            .and_then(|meta| meta.signals.clone())
            .unwrap_or_default(),
        overrides: meta
            .and_then(|meta| meta.overrides.as_ref())
            .map(|overrides| {
                overrides
                    .iter()
                    .filter(|(_, fired)| *fired)
                    .map(|(key, _)| override_label(key).to_string())
                    .collect()
            })
            .unwrap_or_default(),
        reply: result.reply.clone().unwrap_or_default(),
        meta_line: render_meta_line(meta),
        raw_json: serde_json::to_string_pretty(&result.raw)
            .unwrap_or_else(|_| result.raw.to_string()),
    }
}

/// Human-readable label for an override flag; unknown keys render as-is.
pub fn override_label(key: &str) -> &str {
    match key {
        "gratitude_no_action" => "Gratitude",
        "action_over_low_conf" => "Action (low conf.)",
        "marketing_newsletter" => "Marketing/Newsletter",
        "resolved_or_cancelled" => "Resolved/Cancelled",
        "urgency_boost" => "Urgency",
        "short_question_hint" => "Short question",
        "issue_detected" => "Issue detected",
        other => other,
    }
}

/// `round(confidence * 100)` with halves rounded up. Out-of-range values are
/// passed through unclamped.
pub fn confidence_percent(confidence: Option<f64>) -> Option<i64> {
    let scaled = confidence? * 100.0;
    if !scaled.is_finite() {
        return None;
    }
    Some((scaled + 0.5).floor() as i64)
}

fn render_badge(category: Option<&str>, productive_label: &str) -> BadgeView {
    match category.filter(|category| !category.is_empty()) {
        Some(category) => BadgeView {
            text: category.to_string(),
            style: if category == productive_label {
                BadgeStyle::Positive
            } else {
                BadgeStyle::Neutral
            },
        },
        None => BadgeView {
            text: PLACEHOLDER.to_string(),
            style: BadgeStyle::Neutral,
        },
    }
}

fn render_confidence(confidence: Option<f64>) -> ConfidenceView {
    match confidence_percent(confidence) {
        Some(percent) => ConfidenceView {
            percent: Some(percent),
            label: format!("{percent}%"),
            bar_width: format!("{percent}%"),
        },
        None => ConfidenceView {
            percent: None,
            label: PLACEHOLDER.to_string(),
            bar_width: "0%".to_string(),
        },
    }
}

fn render_meta_line(meta: Option<&AnalysisMeta>) -> String {
    let flag = |value: Option<bool>| match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => PLACEHOLDER,
    };
    let number = |value: Option<&serde_json::Number>| {
        value.map_or_else(|| PLACEHOLDER.to_string(), ToString::to_string)
    };

    let fallbacks = meta
        .and_then(|meta| meta.fallbacks.as_ref())
        .map(|fallbacks| fallbacks.join(", "))
        .unwrap_or_default();
    let language = meta
        .and_then(|meta| meta.language.as_deref())
        .filter(|language| !language.is_empty())
        .unwrap_or(PLACEHOLDER);

    format!(
        "Used HF: {} | Used LLM: {} | Fallbacks: {} | Time: {} ms | Size: {} chars | Language: {}",
        flag(meta.and_then(|meta| meta.used_hf)),
        flag(meta.and_then(|meta| meta.used_openai)),
        fallbacks,
        number(meta.and_then(|meta| meta.elapsed_ms.as_ref())),
        number(meta.and_then(|meta| meta.output_size.as_ref())),
        language,
    )
}
