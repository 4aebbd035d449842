//! Inclusive date-time ranges used for reporting windows.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::shared::DomainError;

/// An inclusive `[start, end]` window.
///
/// Reporting windows always start at the beginning of a day and end on the
/// last nanosecond of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// Create a range from two instants.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` lies before `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::invalid(
                "end",
                "the end date must be on or after the start date",
            ));
        }
        Ok(Self { start, end })
    }

    /// Create a whole-day range: `start` at 00:00:00 up to the last instant
    /// of `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` lies before `start`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        Self::new(start_of_day(start), end_of_day(end))
    }

    /// Start of the window.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the window.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether an instant falls inside the window (inclusive).
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Whether the window overlaps the given calendar-day span.
    #[must_use]
    pub fn overlaps_days(&self, first: NaiveDate, last: NaiveDate) -> bool {
        let range_first = self.start.date_naive();
        let range_last = self.end.date_naive();
        first <= range_last && last >= range_first
    }
}

/// Midnight at the start of the given day.
#[must_use]
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// The last representable instant of the given day.
///
/// ATOM output truncates it to `23:59:59`.
#[must_use]
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last_instant =
        NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&date.and_time(last_instant))
}

/// Format an instant in ATOM notation (`2024-01-31T23:59:59+00:00`).
#[must_use]
pub fn to_atom_string(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, false)
}
