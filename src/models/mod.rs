//! Value objects shared by the course engine.
//!
//! Every type here is plain data: cloneable, serializable and recomputed on
//! demand by the operations in [`crate::calculation`].

mod attendance;
mod breakdown;
mod interview;
mod schedule;
mod threshold;
pub mod time_format;

pub use attendance::{
    AttendancePolicy, AttendanceRecord, AttendanceReport, AttendanceReportRow, AttendanceStatus,
    AttendanceSummary, ReportWarning, SubjectAttendance,
};
pub use breakdown::{
    AnswerValue, Breakdown, BreakdownItem, NO_LABEL, NOT_INFORMED_LABEL, QuestionKind, YES_LABEL,
};
pub use interview::{Incident, IncidentDimension, InterviewResponse, Question, QuestionBreakdown};
pub use schedule::{
    Holiday, ScheduleSpec, SessionDescriptor, WEEK_ORDER, WeekdaySet, parse_weekday, weekday_code,
};
pub use threshold::{
    ATTENDANCE_BAND_SET, ATTENDANCE_COMPACT_BAND_SET, BandSet, Classification, ThresholdBand,
};
pub use time_format::{format_wall_clock, parse_calendar_date, parse_wall_clock};
