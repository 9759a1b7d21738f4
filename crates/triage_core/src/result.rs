use serde_json::{Map, Number, Value};

/// Loosely structured verdict returned by the classifier.
///
/// Every field is optional. Fields with an unexpected JSON type are treated
/// as absent rather than failing the whole response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisResult {
    pub category: Option<String>,
    pub confidence: Option<f64>,
    pub reply: Option<String>,
    pub meta: Option<AnalysisMeta>,
    /// The response exactly as received, for the raw viewer.
    pub raw: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisMeta {
    pub signals: Option<Vec<String>>,
    /// Override flags in response key order. Non-boolean values are dropped.
    pub overrides: Option<Vec<(String, bool)>>,
    pub used_hf: Option<bool>,
    pub used_openai: Option<bool>,
    pub fallbacks: Option<Vec<String>>,
    pub elapsed_ms: Option<Number>,
    pub output_size: Option<Number>,
    pub language: Option<String>,
}

impl AnalysisResult {
    pub fn from_value(value: Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self {
                raw: value,
                ..Self::default()
            };
        };
        Self {
            category: string_field(object, "category"),
            confidence: object.get("confidence").and_then(Value::as_f64),
            reply: string_field(object, "reply"),
            meta: object
                .get("meta")
                .and_then(Value::as_object)
                .map(AnalysisMeta::from_object),
            raw: value,
        }
    }
}

impl AnalysisMeta {
    fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            signals: string_list(object, "signals"),
            overrides: object.get("overrides").and_then(Value::as_object).map(|map| {
                map.iter()
                    .filter_map(|(key, value)| value.as_bool().map(|flag| (key.clone(), flag)))
                    .collect()
            }),
            used_hf: object.get("used_hf").and_then(Value::as_bool),
            used_openai: object.get("used_openai").and_then(Value::as_bool),
            fallbacks: string_list(object, "fallbacks"),
            elapsed_ms: number_field(object, "elapsed_ms"),
            output_size: number_field(object, "output_size"),
            language: string_field(object, "language"),
        }
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(ToOwned::to_owned)
}

fn number_field(object: &Map<String, Value>, key: &str) -> Option<Number> {
    match object.get(key) {
        Some(Value::Number(number)) => Some(number.clone()),
        _ => None,
    }
}

fn string_list(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    object.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(ToOwned::to_owned)
            .collect()
    })
}
