//! Attendance models.
//!
//! Attendance records arrive from roll-call screens through the reporting
//! endpoint; the engine only reads them. Summaries and reports are the values
//! handed to report tables and exporters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Classification;

/// The roll-call status of one student in one session.
///
/// Deserializes from any JSON value so that records taken straight from
/// network responses never fail to parse. `null` becomes
/// [`AttendanceStatus::NotRecorded`]; unrecognised spellings and non-string
/// values become [`AttendanceStatus::Unknown`], which the aggregator never
/// counts.
///
/// # Example
///
/// ```
/// use course_engine::models::AttendanceStatus;
///
/// let status: AttendanceStatus = serde_json::from_str("\"presente\"").unwrap();
/// assert_eq!(status, AttendanceStatus::Present);
///
/// let status: AttendanceStatus = serde_json::from_str("\"late\"").unwrap();
/// assert_eq!(status, AttendanceStatus::Unknown);
///
/// let status: AttendanceStatus = serde_json::from_str("null").unwrap();
/// assert_eq!(status, AttendanceStatus::NotRecorded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The student attended.
    Present,
    /// The student was absent without justification.
    Absent,
    /// The student was absent with an accepted justification.
    Justified,
    /// Roll-call has not been taken for this student yet.
    NotRecorded,
    /// A status the engine does not recognise.
    Unknown,
}

impl AttendanceStatus {
    /// Parses a status spelling used by the roll-call screens.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "present" | "presente" | "p" => AttendanceStatus::Present,
            "absent" | "ausente" | "falta" | "f" => AttendanceStatus::Absent,
            "justified" | "justificada" | "justificado" | "falta_justificada" | "j" => {
                AttendanceStatus::Justified
            }
            "not_recorded" | "nao_registrado" | "não_registrado" | "" => {
                AttendanceStatus::NotRecorded
            }
            _ => AttendanceStatus::Unknown,
        }
    }
}

impl From<String> for AttendanceStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<serde_json::Value> for AttendanceStatus {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => AttendanceStatus::NotRecorded,
            serde_json::Value::String(text) => Self::parse(&text),
            _ => AttendanceStatus::Unknown,
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Absent => write!(f, "absent"),
            AttendanceStatus::Justified => write!(f, "justified"),
            AttendanceStatus::NotRecorded => write!(f, "not_recorded"),
            AttendanceStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// One roll-call entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The student the entry is about.
    pub student_id: String,
    /// The session the entry belongs to.
    pub session_id: String,
    /// The course of the session, when the endpoint supplies it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    /// The roll-call status.
    pub status: AttendanceStatus,
}

/// Which statuses count toward the attendance percentage.
///
/// The student dashboard and the report screens disagree on whether justified
/// absences count as attendance, so both rules are named here and the call
/// site picks one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendancePolicy {
    /// Only `present` counts as attended.
    #[default]
    PresentOnly,
    /// `present` and `justified` both count as attended.
    PresentAndJustified,
}

/// Counts and percentage for one student, course, or student-in-course.
///
/// # Example
///
/// ```
/// use course_engine::models::AttendanceSummary;
///
/// let summary = AttendanceSummary {
///     total_sessions: 10,
///     present_count: 8,
///     absent_count: 1,
///     justified_count: 1,
///     attendance_percent: 80,
/// };
/// assert_eq!(summary.recorded_count(), 10);
/// assert_eq!(summary.unrecorded_count(), 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Sessions the student or course was expected to attend.
    pub total_sessions: u32,
    /// Sessions marked present.
    pub present_count: u32,
    /// Sessions marked absent.
    pub absent_count: u32,
    /// Sessions marked as justified absences.
    pub justified_count: u32,
    /// Rounded whole percentage in `0..=100`.
    pub attendance_percent: u32,
}

impl AttendanceSummary {
    /// Returns the number of sessions with a counted status.
    pub fn recorded_count(&self) -> u32 {
        self.present_count + self.absent_count + self.justified_count
    }

    /// Returns the number of sessions without a counted status.
    pub fn unrecorded_count(&self) -> u32 {
        self.total_sessions.saturating_sub(self.recorded_count())
    }
}

/// The raw attendance of one report subject, as fetched from the reporting
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAttendance {
    /// The student or course the records belong to.
    pub subject_id: String,
    /// Sessions the subject was expected to attend.
    pub total_sessions: u32,
    /// Roll-call entries for the subject.
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
}

/// A single row of an attendance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReportRow {
    /// The student or course the row is about.
    pub subject_id: String,
    /// The aggregated counts.
    pub summary: AttendanceSummary,
    /// The band the attendance percentage falls in.
    pub classification: Classification,
}

/// A condition worth showing next to a report without blocking it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The row the warning refers to.
    pub subject_id: String,
}

/// A complete attendance report, ready for tables and exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that built the report.
    pub engine_version: String,
    /// The counting rule used for every row.
    pub policy: AttendancePolicy,
    /// The name of the band set used for classification.
    pub band_set: String,
    /// One row per subject, in input order.
    pub rows: Vec<AttendanceReportRow>,
    /// Warnings raised while building the rows.
    pub warnings: Vec<ReportWarning>,
}
