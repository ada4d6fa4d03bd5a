//! Breakdown models for categorical answers.
//!
//! Interview answers and incident fields reach the engine as loosely-typed
//! JSON. [`AnswerValue`] normalises them into the few shapes the breakdown
//! aggregator understands; the resulting [`Breakdown`] is consumed directly by
//! dashboards and exporters, so its serialized shape is kept stable.

use serde::{Deserialize, Serialize};

/// Label of the reserved bucket for missing, null and empty answers.
pub const NOT_INFORMED_LABEL: &str = "Não informado";

/// Label of the `true` bucket of a boolean question.
pub const YES_LABEL: &str = "Sim";

/// Label of the `false` bucket of a boolean question.
pub const NO_LABEL: &str = "Não";

/// A single answer value.
///
/// Deserializes from any JSON value: `null` becomes `Missing`, numbers become
/// `Text`, arrays of strings or numbers become `Many`, and objects or nested
/// arrays become `Unsupported`.
///
/// # Example
///
/// ```
/// use course_engine::models::AnswerValue;
///
/// let answers: Vec<AnswerValue> =
///     serde_json::from_str(r#"[true, null, "Costura", ["Informática"], {"x": 1}]"#).unwrap();
/// assert_eq!(answers[0], AnswerValue::Bool(true));
/// assert_eq!(answers[1], AnswerValue::Missing);
/// assert_eq!(answers[2], AnswerValue::Text("Costura".to_string()));
/// assert_eq!(answers[3], AnswerValue::Many(vec!["Informática".to_string()]));
/// assert_eq!(answers[4], AnswerValue::Unsupported);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, from = "serde_json::Value")]
pub enum AnswerValue {
    /// No answer was given.
    #[default]
    Missing,
    /// A yes/no answer.
    Bool(bool),
    /// A single text or option answer.
    Text(String),
    /// A multi-select answer.
    Many(Vec<String>),
    /// A shape no question kind can count.
    Unsupported,
}

impl AnswerValue {
    /// Returns true for missing answers, empty strings and empty selections.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Missing => true,
            AnswerValue::Text(text) => text.trim().is_empty(),
            AnswerValue::Many(items) => items.iter().all(|item| item.trim().is_empty()),
            AnswerValue::Bool(_) | AnswerValue::Unsupported => false,
        }
    }
}

impl From<serde_json::Value> for AnswerValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => AnswerValue::Missing,
            Value::Bool(flag) => AnswerValue::Bool(flag),
            Value::String(text) => AnswerValue::Text(text),
            Value::Number(number) => AnswerValue::Text(number.to_string()),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(text) => Some(text),
                    Value::Number(number) => Some(number.to_string()),
                    _ => None,
                })
                .collect::<Option<Vec<String>>>()
                .map_or(AnswerValue::Unsupported, AnswerValue::Many),
            Value::Object(_) => AnswerValue::Unsupported,
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(flag: bool) -> Self {
        AnswerValue::Bool(flag)
    }
}

impl From<&str> for AnswerValue {
    fn from(text: &str) -> Self {
        AnswerValue::Text(text.to_string())
    }
}

impl<T: Into<AnswerValue>> From<Option<T>> for AnswerValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AnswerValue::Missing, Into::into)
    }
}

/// How the answers to a question are tallied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Yes/no: buckets "Sim" and "Não".
    Boolean,
    /// Exactly one option per response.
    #[serde(alias = "single-select", alias = "select", alias = "radio")]
    SingleSelect,
    /// Any number of options per response.
    #[serde(alias = "multi-select", alias = "checkbox")]
    MultiSelect,
    /// Free text: only the response count is reported.
    #[serde(alias = "free-text", alias = "text", alias = "textarea")]
    FreeText,
}

/// One bucket of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownItem {
    /// The option the bucket counts.
    pub label: String,
    /// Responses that fell in the bucket.
    pub count: u32,
    /// `count / total_responses`, as a rounded whole percentage.
    pub percentage: u32,
}

/// The tally of one question's responses.
///
/// For boolean and single-select questions the bucket counts add up to
/// `total_responses`. Multi-select buckets overlap, so their sum may exceed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    /// The kind the responses were tallied as.
    pub kind: QuestionKind,
    /// Buckets in display order. Empty for free-text questions.
    pub items: Vec<BreakdownItem>,
    /// Responses that were counted, blank ones included.
    pub total_responses: u32,
    /// Responses whose shape did not fit the kind and were left out.
    pub skipped_responses: u32,
}

impl Breakdown {
    /// Looks up a bucket by label.
    pub fn item(&self, label: &str) -> Option<&BreakdownItem> {
        self.items.iter().find(|item| item.label == label)
    }

    /// Returns the sum of all bucket counts.
    pub fn count_sum(&self) -> u32 {
        self.items.iter().map(|item| item.count).sum()
    }
}
