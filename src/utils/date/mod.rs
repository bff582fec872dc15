// Date utility functions

use chrono::{Datelike, NaiveDate};

/// True when both dates fall in the same calendar month of the same year.
pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the given month, or `None` for an invalid year/month.
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    first_of_next.pred_opt().map(|d| d.day())
}

/// Lay out the month containing `date` as Sunday-first weeks.
///
/// Cells before the 1st and after the last day are `None`.
pub fn month_grid(date: NaiveDate) -> Vec<[Option<u32>; 7]> {
    let first = first_day_of_month(date);
    let days = last_day_of_month(first.year(), first.month()).unwrap_or(28);
    let lead = first.weekday().num_days_from_sunday() as usize;

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    for day in 1..=days {
        let slot = (lead + day as usize - 1) % 7;
        week[slot] = Some(day);
        if slot == 6 {
            weeks.push(week);
            week = [None; 7];
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}
