use std::fmt::Write;

use chrono::{Datelike, NaiveDate};

use crate::services::event::EventStore;
use crate::utils::date::month_grid;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
// Fits the widest cell, a selected day that is today and has events: `[15!*]`
const CELL_WIDTH: usize = 6;

/// Draw the month containing `selected` as a text grid.
///
/// The selected day is bracketed, today is marked with `!` and days that
/// carry events with `*`.
pub fn render_month(selected: NaiveDate, today: NaiveDate, store: &EventStore) -> String {
    let mut out = String::new();
    let title = selected.format("%B %Y").to_string();
    let width = CELL_WIDTH * 7;
    let _ = writeln!(out, "{:^width$}", title, width = width);

    for name in DAY_NAMES {
        let _ = write!(out, "{:^width$}", name, width = CELL_WIDTH);
    }
    out.push('\n');

    for week in month_grid(selected) {
        for cell in week {
            let text = match cell {
                Some(day) => day_cell(selected, today, store, day),
                None => String::new(),
            };
            let _ = write!(out, "{:^width$}", text, width = CELL_WIDTH);
        }
        out.push('\n');
    }

    out
}

fn day_cell(selected: NaiveDate, today: NaiveDate, store: &EventStore, day: u32) -> String {
    let Some(date) = selected.with_day(day) else {
        return String::new();
    };

    let mut text = day.to_string();
    if date == today {
        text.push('!');
    }
    if store.has_event(date) {
        text.push('*');
    }
    if date == selected {
        text = format!("[{}]", text);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_render_month_header() {
        let out = render_month(d(2024, 3, 15), d(2000, 1, 1), &EventStore::new());
        let mut lines = out.lines();

        assert_eq!(lines.next().unwrap().trim(), "March 2024");
        assert_eq!(
            lines.next().unwrap().split_whitespace().collect::<Vec<_>>(),
            DAY_NAMES
        );
        assert_eq!(out.lines().count(), 2 + 6);
    }

    #[test]
    fn test_render_month_markers() {
        let mut store = EventStore::new();
        store
            .create_event(
                d(2024, 3, 20),
                "Party",
                NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            )
            .unwrap();

        let out = render_month(d(2024, 3, 15), d(2024, 3, 4), &store);

        assert!(out.contains("[15]"));
        assert!(out.contains("20*"));
        assert!(out.contains("4!"));
    }

    #[test]
    fn test_render_month_keeps_columns_aligned() {
        let mut store = EventStore::new();
        store
            .create_event(
                d(2024, 3, 15),
                "Review",
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            )
            .unwrap();

        let out = render_month(d(2024, 3, 15), d(2024, 3, 15), &store);

        assert!(out.contains("[15!*]"));
        for line in out.lines().skip(1) {
            assert_eq!(line.chars().count(), CELL_WIDTH * 7, "misaligned row: {:?}", line);
        }
    }
}
