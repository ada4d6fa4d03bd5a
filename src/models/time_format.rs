//! Wall-clock and calendar-date parsing.
//!
//! Course forms submit times as `HH:mm` strings. chrono's own serde format for
//! [`NaiveTime`] expects seconds, so schedule fields use this module through
//! `#[serde(with = "time_format")]`.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{EngineError, EngineResult};

const WALL_CLOCK_FORMAT: &str = "%H:%M";
const WALL_CLOCK_FORMAT_WITH_SECONDS: &str = "%H:%M:%S";
const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a wall-clock time in `HH:mm` (or `HH:mm:ss`) form.
///
/// # Example
///
/// ```
/// use course_engine::models::parse_wall_clock;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_wall_clock("19:00").unwrap(), NaiveTime::from_hms_opt(19, 0, 0).unwrap());
/// assert_eq!(parse_wall_clock("08:30:00").unwrap(), NaiveTime::from_hms_opt(8, 30, 0).unwrap());
/// assert!(parse_wall_clock("7pm").is_err());
/// ```
pub fn parse_wall_clock(value: &str) -> EngineResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, WALL_CLOCK_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, WALL_CLOCK_FORMAT_WITH_SECONDS))
        .map_err(|_| EngineError::InvalidTime {
            value: value.to_string(),
        })
}

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_calendar_date(value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), CALENDAR_DATE_FORMAT).map_err(|_| {
        EngineError::InvalidDate {
            value: value.to_string(),
        }
    })
}

/// Formats a time as `HH:mm`, or `HH:mm:ss` when it has seconds.
pub fn format_wall_clock(time: &NaiveTime) -> String {
    let format = if time.second() == 0 {
        WALL_CLOCK_FORMAT
    } else {
        WALL_CLOCK_FORMAT_WITH_SECONDS
    };
    time.format(format).to_string()
}

/// Serializes a [`NaiveTime`] as `HH:mm`, keeping seconds when present.
pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_wall_clock(time))
}

/// Deserializes a [`NaiveTime`] from `HH:mm` or `HH:mm:ss`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_wall_clock(&raw).map_err(serde::de::Error::custom)
}
