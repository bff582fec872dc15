// Event module
// A named, single-day calendar event

use chrono::{NaiveDate, NaiveTime};

use crate::error::{CalendarError, CalendarResult};
use crate::models::time_interval::TimeInterval;

/// Calendar event scheduled on one date between two times of day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: String,
    date: NaiveDate,
    interval: TimeInterval,
}

impl Event {
    /// Create a new event
    ///
    /// # Arguments
    /// * `name` - Event name (required, non-empty, single line)
    /// * `date` - Day the event happens on
    /// * `start` - Event start time
    /// * `end` - Event end time, strictly after `start`
    ///
    /// # Examples
    /// ```
    /// use simple_calendar::models::event::Event;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    /// let end = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
    /// let event = Event::new("Team Meeting", date, start, end).unwrap();
    /// assert_eq!(event.name(), "Team Meeting");
    /// ```
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> CalendarResult<Self> {
        let interval = TimeInterval::new(start, end)?;
        Self::with_interval(name, date, interval)
    }

    /// Create an event from an already validated interval
    pub fn with_interval(
        name: impl Into<String>,
        date: NaiveDate,
        interval: TimeInterval,
    ) -> CalendarResult<Self> {
        let name = name.into();
        validate_name(&name)?;

        Ok(Self {
            name,
            date,
            interval,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn interval(&self) -> &TimeInterval {
        &self.interval
    }

    pub fn start(&self) -> NaiveTime {
        self.interval.start()
    }

    pub fn end(&self) -> NaiveTime {
        self.interval.end()
    }

    /// Check if this event's time slot collides with `interval`
    pub fn conflicts_with(&self, interval: &TimeInterval) -> bool {
        self.interval.overlaps(interval)
    }
}

fn validate_name(name: &str) -> CalendarResult<()> {
    if name.trim().is_empty() {
        return Err(CalendarError::InvalidEvent(
            "Event name cannot be empty".to_string(),
        ));
    }

    // Names occupy exactly one line in the events file
    if name.contains(|c| c == '\n' || c == '\r') {
        return Err(CalendarError::InvalidEvent(
            "Event name cannot contain line breaks".to_string(),
        ));
    }

    Ok(())
}
