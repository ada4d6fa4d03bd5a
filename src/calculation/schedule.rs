//! Session schedule generation.
//!
//! Turns a course's date range, weekday pattern and time window into the list
//! of sessions that gets previewed in the course form and then persisted as
//! individual session rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Holiday, ScheduleSpec, SessionDescriptor};

use super::calendar::DateRange;
use super::weekday_filter::weekday_matches;

/// Topic given to generated sessions until staff fill in the lesson plan.
pub const DEFAULT_SESSION_TOPIC: &str = "Conteúdo a definir";

/// Generates the sessions of a course with the default topic.
///
/// Walks every date from `start_date` to `end_date` inclusive and emits one
/// session for each date whose weekday is in `weekdays`. The output is in
/// ascending date order with no duplicates. A reversed date range or an empty
/// weekday set yields an empty list rather than an error.
///
/// # Example
///
/// ```
/// use course_engine::calculation::generate_schedule;
/// use course_engine::models::ScheduleSpec;
/// use chrono::{NaiveDate, NaiveTime, Weekday};
///
/// let spec = ScheduleSpec {
///     start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), // Monday
///     end_date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
///     weekdays: [Weekday::Mon, Weekday::Wed, Weekday::Fri].into_iter().collect(),
///     start_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
/// };
///
/// let sessions = generate_schedule(&spec);
/// let dates: Vec<String> = sessions.iter().map(|s| s.date.to_string()).collect();
/// assert_eq!(dates, vec!["2024-03-04", "2024-03-06", "2024-03-08"]);
/// ```
pub fn generate_schedule(spec: &ScheduleSpec) -> Vec<SessionDescriptor> {
    generate_schedule_with_topic(spec, DEFAULT_SESSION_TOPIC)
}

/// Generates the sessions of a course, labelling each with `topic`.
pub fn generate_schedule_with_topic(spec: &ScheduleSpec, topic: &str) -> Vec<SessionDescriptor> {
    if spec.weekdays.is_empty() {
        return Vec::new();
    }

    let sessions: Vec<SessionDescriptor> = DateRange::new(spec.start_date, spec.end_date)
        .filter(|date| weekday_matches(&spec.weekdays, *date))
        .map(|date| SessionDescriptor {
            date,
            start_time: spec.start_time,
            end_time: spec.end_time,
            topic: topic.to_string(),
        })
        .collect();

    debug!(
        start_date = %spec.start_date,
        end_date = %spec.end_date,
        weekdays = spec.weekdays.len(),
        sessions = sessions.len(),
        "Generated course schedule"
    );

    sessions
}

/// Generates the sessions of a course, leaving out holidays.
///
/// Identical to [`generate_schedule`] except that sessions falling on any of
/// the holiday dates are dropped.
pub fn generate_schedule_excluding(
    spec: &ScheduleSpec,
    holidays: &[Holiday],
) -> Vec<SessionDescriptor> {
    let holiday_dates: Vec<NaiveDate> = holidays.iter().map(|h| h.date).collect();
    generate_schedule(spec)
        .into_iter()
        .filter(|session| !holiday_dates.contains(&session.date))
        .collect()
}

/// Returns the length of one session in hours.
///
/// Fractional hours are kept down to the second (`19:00`-`20:30` is `1.5`,
/// `19:00:00`-`19:00:45` is `0.0125`). A window
/// whose end is not after its start has zero length.
pub fn hours_per_session(spec: &ScheduleSpec) -> Decimal {
    if spec.end_time <= spec.start_time {
        return Decimal::ZERO;
    }
    let seconds = (spec.end_time - spec.start_time).num_seconds();
    Decimal::new(seconds, 0) / Decimal::new(3600, 0)
}

/// Suggests the total workload in hours for `session_count` sessions.
///
/// The value is advisory; course staff may enter a different workload.
///
/// # Example
///
/// ```
/// use course_engine::calculation::{compute_workload_hours, generate_schedule};
/// use course_engine::models::ScheduleSpec;
/// use chrono::{NaiveDate, NaiveTime, Weekday};
/// use rust_decimal::Decimal;
///
/// let spec = ScheduleSpec {
///     start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
///     weekdays: [Weekday::Mon, Weekday::Wed, Weekday::Fri].into_iter().collect(),
///     start_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
/// };
///
/// let sessions = generate_schedule(&spec);
/// assert_eq!(compute_workload_hours(&spec, sessions.len()), Decimal::from(6));
/// ```
pub fn compute_workload_hours(spec: &ScheduleSpec, session_count: usize) -> Decimal {
    Decimal::from(session_count as u64) * hours_per_session(spec)
}

/// A problem with a schedule definition that the course form should report
/// before saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleIssue {
    /// The end date is before the start date.
    EndDateBeforeStartDate,
    /// No weekday was selected.
    NoWeekdaysSelected,
    /// The session end time is before its start time.
    EndTimeBeforeStartTime,
    /// Sessions start and end at the same time, so the workload is zero.
    ZeroLengthSession,
    /// No date in the range falls on a selected weekday.
    NoQualifyingDates,
}

impl std::fmt::Display for ScheduleIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleIssue::EndDateBeforeStartDate => write!(f, "end date is before start date"),
            ScheduleIssue::NoWeekdaysSelected => write!(f, "no weekday selected"),
            ScheduleIssue::EndTimeBeforeStartTime => write!(f, "end time is before start time"),
            ScheduleIssue::ZeroLengthSession => write!(f, "sessions have zero length"),
            ScheduleIssue::NoQualifyingDates => {
                write!(f, "no date in the range falls on a selected weekday")
            }
        }
    }
}

/// Lists the problems of a schedule definition.
///
/// Generation does not depend on this check: it is for the caller to show
/// the user. An empty list means the schedule is sound.
pub fn validate_schedule(spec: &ScheduleSpec) -> Vec<ScheduleIssue> {
    let mut issues = Vec::new();

    let range_valid = spec.start_date <= spec.end_date;
    if !range_valid {
        issues.push(ScheduleIssue::EndDateBeforeStartDate);
    }
    if spec.weekdays.is_empty() {
        issues.push(ScheduleIssue::NoWeekdaysSelected);
    }
    if spec.end_time < spec.start_time {
        issues.push(ScheduleIssue::EndTimeBeforeStartTime);
    } else if spec.end_time == spec.start_time {
        issues.push(ScheduleIssue::ZeroLengthSession);
    }

    // Any seven consecutive days cover every weekday
    if range_valid
        && !spec.weekdays.is_empty()
        && !DateRange::new(spec.start_date, spec.end_date)
            .take(7)
            .any(|date| weekday_matches(&spec.weekdays, date))
    {
        issues.push(ScheduleIssue::NoQualifyingDates);
    }

    issues
}
