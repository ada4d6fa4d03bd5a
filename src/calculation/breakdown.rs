//! Category breakdown aggregation.
//!
//! One tally serves interview analytics and incident statistics alike: the
//! adapters at the bottom of this module turn interview responses and
//! incidents into plain [`AnswerValue`]s and hand them to [`breakdown`].

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::models::{
    AnswerValue, Breakdown, BreakdownItem, Incident, IncidentDimension, InterviewResponse,
    NO_LABEL, NOT_INFORMED_LABEL, Question, QuestionBreakdown, QuestionKind, YES_LABEL,
};

use super::percent::rounded_percent;

/// Tallies answers to one question.
///
/// Buckets appear in first-seen order, with the reserved "Não informado"
/// bucket last when any answer was blank. See [`breakdown_with_options`] for
/// the counting rules.
///
/// # Example
///
/// ```
/// use course_engine::calculation::breakdown;
/// use course_engine::models::{AnswerValue, QuestionKind};
///
/// let mut answers = vec![AnswerValue::Bool(true); 45];
/// answers.extend(vec![AnswerValue::Bool(false); 105]);
///
/// let result = breakdown(&answers, QuestionKind::Boolean);
/// assert_eq!(result.total_responses, 150);
/// assert_eq!(result.item("Sim").unwrap().count, 45);
/// assert_eq!(result.item("Sim").unwrap().percentage, 30);
/// assert_eq!(result.item("Não").unwrap().percentage, 70);
/// ```
pub fn breakdown(responses: &[AnswerValue], kind: QuestionKind) -> Breakdown {
    breakdown_with_options(responses, kind, &[])
}

/// Tallies answers to one question, listing declared options even when
/// nobody picked them.
///
/// - `Boolean`: buckets "Sim" and "Não". Textual `true`/`false`/`sim`/`não`
///   are accepted. Declared options are ignored.
/// - `SingleSelect`: one bucket per option; each response lands in exactly
///   one bucket.
/// - `MultiSelect`: one bucket per option; a response counts once toward
///   every distinct option it selected, so bucket counts may add up to more
///   than `total_responses`.
/// - `FreeText`: no buckets, only `total_responses`.
///
/// Missing, null and empty answers go to the "Não informado" bucket, as do
/// answers and declared options spelled "Não informado", so the bucket is
/// listed at most once.
/// Answers whose shape does not fit the kind are counted in
/// `skipped_responses` and left out of `total_responses`. Percentages are
/// `count / total_responses`, rounded to whole percents.
pub fn breakdown_with_options(
    responses: &[AnswerValue],
    kind: QuestionKind,
    options: &[String],
) -> Breakdown {
    let mut tally = Tally::default();
    match kind {
        QuestionKind::Boolean => {
            tally.declare(YES_LABEL);
            tally.declare(NO_LABEL);
        }
        QuestionKind::SingleSelect | QuestionKind::MultiSelect => {
            for option in options
                .iter()
                .map(|option| option.trim())
                .filter(|option| *option != NOT_INFORMED_LABEL)
            {
                tally.declare(option);
            }
        }
        QuestionKind::FreeText => {}
    }

    let mut total_responses = 0u32;
    let mut skipped_responses = 0u32;
    let mut not_informed = 0u32;

    for (index, response) in responses.iter().enumerate() {
        if matches!(response, AnswerValue::Unsupported) {
            debug!(index, ?kind, "Skipping answer with unsupported shape");
            skipped_responses += 1;
            continue;
        }

        if kind == QuestionKind::FreeText {
            total_responses += 1;
            continue;
        }

        if response.is_blank() {
            not_informed += 1;
            total_responses += 1;
            continue;
        }

        let selected = match kind {
            QuestionKind::Boolean => boolean_choice(response),
            QuestionKind::SingleSelect => single_choice(response),
            QuestionKind::MultiSelect => multi_choice(response),
            QuestionKind::FreeText => None,
        };

        match selected {
            Some(labels) => {
                for label in labels {
                    if label == NOT_INFORMED_LABEL {
                        not_informed += 1;
                    } else {
                        tally.count(&label);
                    }
                }
                total_responses += 1;
            }
            None => {
                debug!(index, ?kind, "Skipping answer that does not fit the question kind");
                skipped_responses += 1;
            }
        }
    }

    let mut items: Vec<BreakdownItem> = Vec::new();
    if kind != QuestionKind::FreeText {
        items = tally
            .buckets
            .into_iter()
            .map(|(label, count)| BreakdownItem {
                percentage: rounded_percent(count, total_responses),
                label,
                count,
            })
            .collect();
        if not_informed > 0 {
            items.push(BreakdownItem {
                label: NOT_INFORMED_LABEL.to_string(),
                count: not_informed,
                percentage: rounded_percent(not_informed, total_responses),
            });
        }
    }

    Breakdown {
        kind,
        items,
        total_responses,
        skipped_responses,
    }
}

/// Builds one breakdown per interview question, in question order.
///
/// A response without an answer for a question counts as "Não informado".
pub fn interview_breakdowns(
    questions: &[Question],
    responses: &[InterviewResponse],
) -> Vec<QuestionBreakdown> {
    questions
        .iter()
        .map(|question| {
            let answers: Vec<AnswerValue> = responses
                .iter()
                .map(|response| response.answer(&question.key))
                .collect();
            QuestionBreakdown {
                question_key: question.key.clone(),
                question_label: question.label.clone(),
                breakdown: breakdown_with_options(&answers, question.kind, &question.options),
            }
        })
        .collect()
}

/// Tallies incidents by category, severity or resolution.
pub fn incident_breakdown(incidents: &[Incident], dimension: IncidentDimension) -> Breakdown {
    let (answers, kind): (Vec<AnswerValue>, QuestionKind) = match dimension {
        IncidentDimension::Category => (
            incidents
                .iter()
                .map(|incident| AnswerValue::from(incident.category.as_deref()))
                .collect(),
            QuestionKind::SingleSelect,
        ),
        IncidentDimension::Severity => (
            incidents
                .iter()
                .map(|incident| AnswerValue::from(incident.severity.as_deref()))
                .collect(),
            QuestionKind::SingleSelect,
        ),
        IncidentDimension::Resolved => (
            incidents
                .iter()
                .map(|incident| AnswerValue::from(incident.resolved))
                .collect(),
            QuestionKind::Boolean,
        ),
    };
    breakdown(&answers, kind)
}

/// Ordered bucket counts.
#[derive(Default)]
struct Tally {
    buckets: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn declare(&mut self, label: &str) -> usize {
        if let Some(position) = self.index.get(label) {
            return *position;
        }
        self.buckets.push((label.to_string(), 0));
        self.index.insert(label.to_string(), self.buckets.len() - 1);
        self.buckets.len() - 1
    }

    fn count(&mut self, label: &str) {
        let position = self.declare(label);
        self.buckets[position].1 += 1;
    }
}

fn parse_boolean_text(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "sim" | "s" | "yes" | "1" => Some(true),
        "false" | "não" | "nao" | "n" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn boolean_label(flag: bool) -> String {
    let label = if flag { YES_LABEL } else { NO_LABEL };
    label.to_string()
}

fn boolean_choice(response: &AnswerValue) -> Option<Vec<String>> {
    match response {
        AnswerValue::Bool(flag) => Some(vec![boolean_label(*flag)]),
        AnswerValue::Text(text) => parse_boolean_text(text).map(|flag| vec![boolean_label(flag)]),
        _ => None,
    }
}

fn single_choice(response: &AnswerValue) -> Option<Vec<String>> {
    match response {
        AnswerValue::Text(text) => Some(vec![text.trim().to_string()]),
        AnswerValue::Bool(flag) => Some(vec![boolean_label(*flag)]),
        AnswerValue::Many(items) => {
            let picked: Vec<&String> = items.iter().filter(|i| !i.trim().is_empty()).collect();
            match picked.as_slice() {
                [only] => Some(vec![only.trim().to_string()]),
                _ => None,
            }
        }
        _ => None,
    }
}

fn multi_choice(response: &AnswerValue) -> Option<Vec<String>> {
    match response {
        AnswerValue::Text(text) => Some(vec![text.trim().to_string()]),
        AnswerValue::Many(items) => {
            let mut seen = HashSet::new();
            Some(
                items
                    .iter()
                    .map(|item| item.trim())
                    .filter(|item| !item.is_empty() && seen.insert(*item))
                    .map(str::to_string)
                    .collect(),
            )
        }
        _ => None,
    }
}
