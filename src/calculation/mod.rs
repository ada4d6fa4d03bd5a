//! Calculation logic for the course engine.
//!
//! This module contains the pure operations behind the admin screens:
//! calendar iteration and weekday filtering, recurring session generation
//! with workload hours, attendance aggregation and reporting, threshold
//! classification, and category breakdowns for interviews and incidents.

mod attendance;
mod breakdown;
mod calendar;
mod percent;
mod schedule;
mod threshold;
mod weekday_filter;

pub use attendance::{
    NO_SESSIONS_WARNING, RECORDS_EXCEED_SESSIONS_WARNING, build_attendance_report, summarize,
    summarize_grouped,
};
pub use breakdown::{breakdown, breakdown_with_options, incident_breakdown, interview_breakdowns};
pub use calendar::DateRange;
pub use schedule::{
    DEFAULT_SESSION_TOPIC, ScheduleIssue, compute_workload_hours, generate_schedule,
    generate_schedule_excluding, generate_schedule_with_topic, hours_per_session,
    validate_schedule,
};
pub use threshold::{band_for, classify};
pub use weekday_filter::weekday_matches;
