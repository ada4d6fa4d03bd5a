//! Course scheduling and attendance analytics engine
//!
//! This crate turns a course's date range, weekday pattern and time window into
//! concrete class sessions, and turns roll-call and interview records into the
//! summaries, classifications and breakdown tables shown on dashboards and
//! exported in reports.
//!
//! # Example
//!
//! ```
//! use course_engine::calculation::{classify, compute_workload_hours, generate_schedule, summarize};
//! use course_engine::config::ConfigLoader;
//! use course_engine::models::{AttendanceRecord, AttendanceStatus, ScheduleSpec};
//! use chrono::{NaiveDate, NaiveTime, Weekday};
//! use rust_decimal::Decimal;
//!
//! let spec = ScheduleSpec {
//!     start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
//!     end_date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
//!     weekdays: [Weekday::Mon, Weekday::Wed, Weekday::Fri].into_iter().collect(),
//!     start_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
//!     end_time: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
//! };
//! let sessions = generate_schedule(&spec);
//! assert_eq!(compute_workload_hours(&spec, sessions.len()), Decimal::from(6));
//!
//! let records: Vec<AttendanceRecord> = sessions
//!     .iter()
//!     .take(2)
//!     .map(|s| AttendanceRecord {
//!         student_id: "ana".to_string(),
//!         session_id: s.date.to_string(),
//!         course_id: None,
//!         status: AttendanceStatus::Present,
//!     })
//!     .collect();
//!
//! let loader = ConfigLoader::builtin();
//! let summary = summarize(&records, sessions.len() as u32, loader.config().attendance_policy);
//! assert_eq!(summary.attendance_percent, 67);
//!
//! let bands = loader.attendance_bands().unwrap();
//! assert_eq!(classify(summary.attendance_percent, bands).label, "Regular");
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
