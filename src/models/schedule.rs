//! Schedule models.
//!
//! This module defines the course schedule definition ([`ScheduleSpec`]), the
//! weekday pattern it recurs on ([`WeekdaySet`]) and the concrete sessions
//! generated from it ([`SessionDescriptor`]).

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::time_format;

/// Weekdays in calendar-week order, Sunday first.
pub const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// A set of weekdays on which a course recurs.
///
/// Stored as a bitmask indexed by days from Sunday, so the set is unordered
/// and duplicate-free by construction. Serialized as a list of short codes
/// (`"sun"`, `"mon"`, ...). Deserialization also accepts full English names,
/// Portuguese names (`"segunda"`, `"terça-feira"`, ...) and the JavaScript
/// day index (`"0"` is Sunday).
///
/// # Example
///
/// ```
/// use course_engine::models::WeekdaySet;
/// use chrono::Weekday;
///
/// let weekdays: WeekdaySet = [Weekday::Mon, Weekday::Wed, Weekday::Fri].into_iter().collect();
/// assert!(weekdays.contains(Weekday::Wed));
/// assert!(!weekdays.contains(Weekday::Tue));
/// assert_eq!(weekdays.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self(0)
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_sunday()
    }

    /// Adds a weekday. Returns `false` if it was already present.
    pub fn insert(&mut self, day: Weekday) -> bool {
        let present = self.contains(day);
        self.0 |= Self::bit(day);
        !present
    }

    /// Removes a weekday. Returns `true` if it was present.
    pub fn remove(&mut self, day: Weekday) -> bool {
        let present = self.contains(day);
        self.0 &= !Self::bit(day);
        present
    }

    /// Returns true if the weekday is a member of the set.
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    /// Returns the number of weekdays in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if no weekday is selected.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the members in calendar-week order, Sunday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK_ORDER.iter().copied().filter(|day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl TryFrom<Vec<String>> for WeekdaySet {
    type Error = EngineError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        names
            .iter()
            .map(|name| {
                parse_weekday(name).ok_or_else(|| EngineError::InvalidWeekday {
                    value: name.clone(),
                })
            })
            .collect()
    }
}

impl From<WeekdaySet> for Vec<String> {
    fn from(set: WeekdaySet) -> Self {
        set.iter().map(|day| weekday_code(day).to_string()).collect()
    }
}

/// Returns the short lowercase code for a weekday (`"mon"`, `"tue"`, ...).
pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "sun",
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
    }
}

/// Parses a weekday name as submitted by course forms.
///
/// Accepts English names and abbreviations, Portuguese names with or without
/// the `-feira` suffix or accents, and the JavaScript day index `0..=6`.
///
/// # Example
///
/// ```
/// use course_engine::models::parse_weekday;
/// use chrono::Weekday;
///
/// assert_eq!(parse_weekday("Mon"), Some(Weekday::Mon));
/// assert_eq!(parse_weekday("terça-feira"), Some(Weekday::Tue));
/// assert_eq!(parse_weekday("6"), Some(Weekday::Sat));
/// assert_eq!(parse_weekday("someday"), None);
/// ```
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let normalized = name.trim().to_lowercase();
    if let Ok(day) = normalized.parse::<Weekday>() {
        return Some(day);
    }

    let stem = normalized
        .trim_end_matches("-feira")
        .trim_end_matches(" feira");

    match stem {
        "0" | "dom" | "domingo" => Some(Weekday::Sun),
        "1" | "seg" | "segunda" => Some(Weekday::Mon),
        "2" | "ter" | "terça" | "terca" => Some(Weekday::Tue),
        "3" | "qua" | "quarta" => Some(Weekday::Wed),
        "4" | "qui" | "quinta" => Some(Weekday::Thu),
        "5" | "sex" | "sexta" => Some(Weekday::Fri),
        "6" | "sáb" | "sab" | "sábado" | "sabado" => Some(Weekday::Sat),
        _ => None,
    }
}

/// The recurrence definition of a course.
///
/// Dates are plain calendar values and both ends are inclusive. Times are
/// wall-clock values attached to each generated date.
///
/// # Example
///
/// ```
/// use course_engine::models::ScheduleSpec;
///
/// let spec: ScheduleSpec = serde_json::from_str(r#"{
///     "start_date": "2024-03-04",
///     "end_date": "2024-03-08",
///     "weekdays": ["mon", "wed", "fri"],
///     "start_time": "19:00",
///     "end_time": "21:00"
/// }"#).unwrap();
/// assert_eq!(spec.weekdays.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSpec {
    /// First calendar date of the course (inclusive).
    pub start_date: NaiveDate,
    /// Last calendar date of the course (inclusive).
    pub end_date: NaiveDate,
    /// Weekdays on which the course meets.
    pub weekdays: WeekdaySet,
    /// Wall-clock start of every session.
    #[serde(with = "time_format")]
    pub start_time: NaiveTime,
    /// Wall-clock end of every session.
    #[serde(with = "time_format")]
    pub end_time: NaiveTime,
}

impl ScheduleSpec {
    /// Returns true if the date falls within the course's date range.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// One concrete meeting of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescriptor {
    /// The calendar date of the session.
    pub date: NaiveDate,
    /// Wall-clock start.
    #[serde(with = "time_format")]
    pub start_time: NaiveTime,
    /// Wall-clock end.
    #[serde(with = "time_format")]
    pub end_time: NaiveTime,
    /// The lesson topic; a placeholder until staff fill it in.
    pub topic: String,
}

impl SessionDescriptor {
    /// Returns the weekday of the session.
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

/// A date on which courses do not meet.
///
/// # Example
///
/// ```
/// use course_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2024, 4, 21).unwrap(),
///     name: "Tiradentes".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}
