//! Observation time handling.
//!
//! The scraper records timestamps as `YYYY-MM-DD HH:MM:SS` strings with
//! whole-second granularity. This module provides a date-aware, minute-level
//! time type for them: seconds are zeroed at construction, so repeated polls
//! within the same minute compare equal on time. That truncation is what
//! makes clustering deterministic.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

/// Lexical form the scraper writes timestamps in.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Error returned when parsing an invalid timestamp string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A date-aware, minute-truncated observation time.
///
/// Holds both the calendar date and the time of day, with seconds always
/// zero. The date matters because the same `08:35` on different days is a
/// different arrival; the time of day drives clustering via [`sort_key`].
///
/// [`sort_key`]: StopTime::sort_key
///
/// # Examples
///
/// ```
/// use bus_stats::domain::StopTime;
///
/// let t = StopTime::parse("2018-12-13 08:35:42").unwrap();
/// assert_eq!(t.to_string(), "2018-12-13 08:35");
///
/// // Seconds are truncated: polls within the same minute compare equal
/// let again = StopTime::parse("2018-12-13 08:35:07").unwrap();
/// assert_eq!(t, again);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopTime {
    date: NaiveDate,
    time: NaiveTime,
}

impl StopTime {
    /// Create a StopTime from date and time components, zeroing seconds.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        let time = time
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(time);
        Self { date, time }
    }

    /// Parse a timestamp in `YYYY-MM-DD HH:MM:SS` form, truncating seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_stats::domain::StopTime;
    ///
    /// assert!(StopTime::parse("2018-12-13 08:35:00").is_ok());
    ///
    /// // Wrong shape, missing seconds, out-of-range values all fail
    /// assert!(StopTime::parse("2018-12-13T08:35:00").is_err());
    /// assert!(StopTime::parse("2018-12-13 08:35").is_err());
    /// assert!(StopTime::parse("2018-13-01 08:35:00").is_err());
    /// assert!(StopTime::parse("2018-12-13 25:00:00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let dt = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
            .map_err(|_| TimeError::new("expected YYYY-MM-DD HH:MM:SS"))?;
        Ok(Self::new(dt.date(), dt.time()))
    }

    /// Returns the calendar date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the time of day (seconds always zero).
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// Minutes since midnight of the time-of-day component.
    ///
    /// This is the key used both for ordering within a day and for the
    /// minute-distance measure during clustering.
    pub fn sort_key(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Converts to a NaiveDateTime.
    pub fn to_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Advance by a number of minutes, crossing midnight if needed.
    ///
    /// Returns `None` only on date overflow at the edge of chrono's range.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_stats::domain::StopTime;
    ///
    /// let t = StopTime::parse("2018-12-13 23:55:00").unwrap();
    /// let later = t.plus_minutes(10).unwrap();
    /// assert_eq!(later.to_string(), "2018-12-14 00:05");
    /// ```
    pub fn plus_minutes(&self, minutes: i64) -> Option<Self> {
        let dt = self
            .to_datetime()
            .checked_add_signed(Duration::minutes(minutes))?;
        Some(Self::new(dt.date(), dt.time()))
    }
}

impl fmt::Debug for StopTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StopTime({} {:02}:{:02})",
            self.date,
            self.hour(),
            self.minute()
        )
    }
}

impl fmt::Display for StopTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:{:02}", self.date, self.hour(), self.minute())
    }
}
