//! Attendance aggregation.
//!
//! Reduces roll-call records to counts and a percentage. The aggregator is
//! axis-agnostic: it only needs the records and the number of expected
//! sessions, whether those describe one student in one course, one student
//! across courses, or one course across its students.

use std::collections::{BTreeMap, HashSet};
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{
    AttendancePolicy, AttendanceRecord, AttendanceReport, AttendanceReportRow, AttendanceStatus,
    AttendanceSummary, BandSet, ReportWarning, SubjectAttendance,
};

use super::percent::rounded_percent;
use super::threshold::classify;

/// Warning code for a subject with no expected sessions.
pub const NO_SESSIONS_WARNING: &str = "NO_SESSIONS";

/// Warning code for a subject with more counted records than sessions.
pub const RECORDS_EXCEED_SESSIONS_WARNING: &str = "RECORDS_EXCEED_SESSIONS";

/// Summarizes attendance records against a number of expected sessions.
///
/// `present`, `absent` and `justified` are tallied separately. Records marked
/// `not_recorded` or with an unrecognised status count toward nothing, and
/// sessions without a record still count toward `total_sessions`. Repeated
/// records for the same student and session are counted once: the first
/// counted status wins, and uncounted rows never hide a later counted one.
///
/// The percentage is `attended / total_sessions * 100`, rounded to a whole
/// percent, where `attended` depends on `policy`. With zero sessions the
/// percentage is zero. Should the counted records outnumber `total_sessions`,
/// the summary's `total_sessions` is raised to the counted number so that the
/// counts never exceed it.
///
/// # Example
///
/// ```
/// use course_engine::calculation::summarize;
/// use course_engine::models::{AttendancePolicy, AttendanceRecord, AttendanceStatus};
///
/// let statuses = [
///     AttendanceStatus::Present, AttendanceStatus::Present, AttendanceStatus::Present,
///     AttendanceStatus::Present, AttendanceStatus::Present, AttendanceStatus::Present,
///     AttendanceStatus::Present, AttendanceStatus::Present, AttendanceStatus::Absent,
///     AttendanceStatus::Justified,
/// ];
/// let records: Vec<AttendanceRecord> = statuses
///     .iter()
///     .enumerate()
///     .map(|(i, status)| AttendanceRecord {
///         student_id: "s1".to_string(),
///         session_id: format!("session_{}", i),
///         course_id: None,
///         status: *status,
///     })
///     .collect();
///
/// let summary = summarize(&records, 10, AttendancePolicy::PresentOnly);
/// assert_eq!(summary.present_count, 8);
/// assert_eq!(summary.attendance_percent, 80);
///
/// let summary = summarize(&records, 10, AttendancePolicy::PresentAndJustified);
/// assert_eq!(summary.attendance_percent, 90);
/// ```
pub fn summarize(
    records: &[AttendanceRecord],
    total_sessions: u32,
    policy: AttendancePolicy,
) -> AttendanceSummary {
    tally(records.iter(), total_sessions, policy)
}

/// Summarizes records grouped by a key, such as student or course.
///
/// `key_of` picks the group of each record and `total_sessions_of` supplies
/// the expected session count of each group. When aggregating a course across
/// its students, that count is sessions times enrolled students.
///
/// # Example
///
/// ```
/// use course_engine::calculation::summarize_grouped;
/// use course_engine::models::{AttendancePolicy, AttendanceRecord, AttendanceStatus};
///
/// let record = |student: &str, session: &str, status| AttendanceRecord {
///     student_id: student.to_string(),
///     session_id: session.to_string(),
///     course_id: None,
///     status,
/// };
/// let records = vec![
///     record("ana", "a1", AttendanceStatus::Present),
///     record("ana", "a2", AttendanceStatus::Absent),
///     record("bia", "a1", AttendanceStatus::Present),
/// ];
///
/// let by_student = summarize_grouped(
///     &records,
///     |r| r.student_id.clone(),
///     |_| 2,
///     AttendancePolicy::PresentOnly,
/// );
/// assert_eq!(by_student["ana"].attendance_percent, 50);
/// assert_eq!(by_student["bia"].attendance_percent, 50);
/// ```
pub fn summarize_grouped<K, F, T>(
    records: &[AttendanceRecord],
    key_of: F,
    total_sessions_of: T,
    policy: AttendancePolicy,
) -> BTreeMap<K, AttendanceSummary>
where
    K: Ord,
    F: Fn(&AttendanceRecord) -> K,
    T: Fn(&K) -> u32,
{
    let mut groups: BTreeMap<K, Vec<&AttendanceRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(key_of(record)).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(key, group)| {
            let total_sessions = total_sessions_of(&key);
            let summary = tally(group.into_iter(), total_sessions, policy);
            (key, summary)
        })
        .collect()
}

/// Builds a classified attendance report, one row per subject.
///
/// Rows keep the input order. Subjects with no expected sessions and subjects
/// whose counted records outnumber their sessions are reported as warnings.
pub fn build_attendance_report(
    subjects: &[SubjectAttendance],
    bands: &BandSet,
    policy: AttendancePolicy,
) -> AttendanceReport {
    let started = Instant::now();
    let report_id = Uuid::new_v4();
    let mut rows = Vec::with_capacity(subjects.len());
    let mut warnings = Vec::new();

    for subject in subjects {
        let summary = summarize(&subject.records, subject.total_sessions, policy);

        if subject.total_sessions == 0 {
            warnings.push(ReportWarning {
                code: NO_SESSIONS_WARNING.to_string(),
                message: "No sessions expected; attendance reported as 0%".to_string(),
                subject_id: subject.subject_id.clone(),
            });
        }
        if summary.total_sessions > subject.total_sessions {
            warnings.push(ReportWarning {
                code: RECORDS_EXCEED_SESSIONS_WARNING.to_string(),
                message: format!(
                    "{} records counted against {} expected sessions",
                    summary.recorded_count(),
                    subject.total_sessions
                ),
                subject_id: subject.subject_id.clone(),
            });
        }

        rows.push(AttendanceReportRow {
            subject_id: subject.subject_id.clone(),
            classification: classify(summary.attendance_percent, bands),
            summary,
        });
    }

    info!(
        report_id = %report_id,
        band_set = bands.name(),
        rows = rows.len(),
        warnings = warnings.len(),
        duration_us = started.elapsed().as_micros() as u64,
        "Attendance report built"
    );

    AttendanceReport {
        report_id,
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        policy,
        band_set: bands.name().to_string(),
        rows,
        warnings,
    }
}

fn tally<'a>(
    records: impl Iterator<Item = &'a AttendanceRecord>,
    total_sessions: u32,
    policy: AttendancePolicy,
) -> AttendanceSummary {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut present_count = 0u32;
    let mut absent_count = 0u32;
    let mut justified_count = 0u32;

    for record in records {
        // Uncounted rows never claim a (student, session) pair
        match record.status {
            AttendanceStatus::NotRecorded => continue,
            AttendanceStatus::Unknown => {
                debug!(
                    student_id = %record.student_id,
                    session_id = %record.session_id,
                    "Skipping attendance record with unknown status"
                );
                continue;
            }
            AttendanceStatus::Present | AttendanceStatus::Absent | AttendanceStatus::Justified => {}
        }

        if !seen.insert((record.student_id.as_str(), record.session_id.as_str())) {
            debug!(
                student_id = %record.student_id,
                session_id = %record.session_id,
                "Skipping duplicate attendance record"
            );
            continue;
        }

        match record.status {
            AttendanceStatus::Present => present_count += 1,
            AttendanceStatus::Absent => absent_count += 1,
            AttendanceStatus::Justified => justified_count += 1,
            AttendanceStatus::NotRecorded | AttendanceStatus::Unknown => {}
        }
    }

    let recorded = present_count + absent_count + justified_count;
    let total_sessions = if recorded > total_sessions {
        warn!(recorded, total_sessions, "Attendance records exceed expected sessions");
        recorded
    } else {
        total_sessions
    };

    let attended = match policy {
        AttendancePolicy::PresentOnly => present_count,
        AttendancePolicy::PresentAndJustified => present_count + justified_count,
    };

    AttendanceSummary {
        total_sessions,
        present_count,
        absent_count,
        justified_count,
        attendance_percent: rounded_percent(attended, total_sessions),
    }
}
