//! Calendar iteration.
//!
//! Walks calendar dates one day at a time using [`NaiveDate`] arithmetic only.
//! No time of day or time zone is involved, so daylight-saving transitions can
//! neither skip nor repeat a date.

use std::iter::FusedIterator;

use chrono::NaiveDate;

/// An inclusive range of calendar dates.
///
/// Empty when `end < start`.
///
/// # Example
///
/// ```
/// use course_engine::calculation::DateRange;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let dates: Vec<NaiveDate> = DateRange::new(start, end).collect();
///
/// // 2024 is a leap year
/// assert_eq!(dates.len(), 3);
/// assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range from `start` to `end`, both inclusive.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }

    fn remaining(&self) -> usize {
        self.next
            .map(|next| (self.end - next).num_days() as usize + 1)
            .unwrap_or(0)
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.end {
            current.succ_opt()
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DateRange {}

impl FusedIterator for DateRange {}
