//! Socioeducational interview and incident models.
//!
//! These are the domain shapes that feed the breakdown aggregator through its
//! adapters.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AnswerValue, Breakdown, QuestionKind};

/// A question of the interview form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Key under which answers are stored.
    pub key: String,
    /// Text shown to the interviewer.
    pub label: String,
    /// How the answers are tallied.
    pub kind: QuestionKind,
    /// Declared options, listed even when nobody picked them.
    #[serde(default)]
    pub options: Vec<String>,
}

/// One completed interview form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewResponse {
    /// The interviewed student.
    pub student_id: String,
    /// Answers keyed by question key. Absent keys are unanswered.
    #[serde(default)]
    pub answers: BTreeMap<String, AnswerValue>,
}

impl InterviewResponse {
    /// Returns the answer to a question, `Missing` when not answered.
    pub fn answer(&self, key: &str) -> AnswerValue {
        self.answers.get(key).cloned().unwrap_or_default()
    }
}

/// The breakdown of one interview question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBreakdown {
    /// The question key.
    pub question_key: String,
    /// The question text.
    pub question_label: String,
    /// The tally.
    pub breakdown: Breakdown,
}

/// An incident logged against a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    /// Unique identifier of the incident.
    pub id: String,
    /// The student involved.
    pub student_id: String,
    /// When the incident happened.
    pub occurred_on: NaiveDate,
    /// Incident category, e.g. "Comportamento".
    #[serde(default)]
    pub category: Option<String>,
    /// Incident severity, e.g. "Alta".
    #[serde(default)]
    pub severity: Option<String>,
    /// Whether the incident has been resolved.
    #[serde(default)]
    pub resolved: Option<bool>,
}

/// Which field of an incident a breakdown tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentDimension {
    /// Tally by category.
    Category,
    /// Tally by severity.
    Severity,
    /// Tally by resolved / unresolved.
    Resolved,
}
