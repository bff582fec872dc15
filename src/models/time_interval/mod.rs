// Time interval module
// Start/end pair of times-of-day used by events

use std::fmt;

use chrono::{NaiveTime, Timelike};

use crate::error::{CalendarError, CalendarResult};

/// A span within a single day, `start` inclusive and `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeInterval {
    /// Create a new interval
    ///
    /// # Arguments
    /// * `start` - Time the interval begins
    /// * `end` - Time the interval ends, strictly after `start`
    ///
    /// # Examples
    /// ```
    /// use simple_calendar::models::time_interval::TimeInterval;
    /// use chrono::NaiveTime;
    ///
    /// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    /// let end = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
    /// let interval = TimeInterval::new(start, end).unwrap();
    /// assert_eq!(interval.to_string(), "09:00 - 10:00");
    /// ```
    pub fn new(start: NaiveTime, end: NaiveTime) -> CalendarResult<Self> {
        if end <= start {
            return Err(CalendarError::InvalidInterval { start, end });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Check whether two intervals share any moment.
    /// Intervals that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Get the duration of the interval
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", format_time(self.start), format_time(self.end))
    }
}

/// Format a time as `HH:MM`, adding seconds and fractional seconds only
/// when they are non-zero.
pub fn format_time(time: NaiveTime) -> String {
    if time.nanosecond() != 0 {
        time.format("%H:%M:%S%.f").to_string()
    } else if time.second() != 0 {
        time.format("%H:%M:%S").to_string()
    } else {
        time.format("%H:%M").to_string()
    }
}

/// Parse `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}
