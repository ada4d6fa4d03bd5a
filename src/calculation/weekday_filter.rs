//! Weekday filtering.

use chrono::{Datelike, NaiveDate};

use crate::models::WeekdaySet;

/// Returns true if the date's weekday is one of the course's weekdays.
///
/// # Example
///
/// ```
/// use course_engine::calculation::weekday_matches;
/// use course_engine::models::WeekdaySet;
/// use chrono::{NaiveDate, Weekday};
///
/// let weekdays: WeekdaySet = [Weekday::Mon, Weekday::Wed].into_iter().collect();
///
/// // 2024-03-04 is a Monday, 2024-03-05 a Tuesday
/// assert!(weekday_matches(&weekdays, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()));
/// assert!(!weekday_matches(&weekdays, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));
/// ```
pub fn weekday_matches(weekdays: &WeekdaySet, date: NaiveDate) -> bool {
    weekdays.contains(date.weekday())
}
