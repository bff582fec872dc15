//! Error types for the calendar core.

use chrono::NaiveTime;
use thiserror::Error;

/// Errors raised by the event store, the date cursor and persistence.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Day {day} does not exist in {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },

    #[error("Event end time {end} must be after start time {start}")]
    InvalidInterval { start: NaiveTime, end: NaiveTime },

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Corrupt event store at line {line}: {reason}")]
    CorruptStore { line: usize, reason: String },

    #[error("Date is outside the supported calendar range")]
    DateOutOfRange,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
