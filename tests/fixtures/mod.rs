// Test fixtures - reusable test data
// Provides consistent dates, times and events across integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use simple_calendar::models::time_interval::TimeInterval;
use simple_calendar::services::event::EventStore;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Returns Jan 1, 2023 (common year)
    pub fn jan_1_2023() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    }

    /// Returns Jan 1, 2024 (leap year)
    pub fn jan_1_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Returns Feb 29, 2024
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    /// Returns Mar 15, 2024
    pub fn team_meeting_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    /// Returns Apr 10, 2024 (April has 30 days)
    pub fn mid_april_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
    }
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn interval(start: (u32, u32), end: (u32, u32)) -> TimeInterval {
    TimeInterval::new(time(start.0, start.1), time(end.0, end.1)).unwrap()
}

/// Store with a handful of events spread over two days
pub fn sample_store() -> EventStore {
    let mut store = EventStore::new();
    let day = dates::team_meeting_day();
    store
        .create_event(day, "Team Meeting", time(9, 0), time(10, 0))
        .unwrap();
    store
        .create_event(day, "Lunch", time(12, 0), time(13, 0))
        .unwrap();
    store
        .create_event(day, "Standup", time(8, 45), time(9, 0))
        .unwrap();
    store
        .create_event(dates::leap_day_2024(), "Leap Party", time(19, 0), time(23, 30))
        .unwrap();
    store
}

/// Text form of `sample_store()` as written by save
pub const SAMPLE_FILE: &str = "\
Leap Party
2024-02-29 19:00 23:30
Team Meeting
2024-03-15 09:00 10:00
Lunch
2024-03-15 12:00 13:00
Standup
2024-03-15 08:45 09:00
";
