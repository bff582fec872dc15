use chrono::NaiveDate;

use crate::services::calendar::Calendar;

/// Heading plus the day's schedule
pub fn render_day(calendar: &Calendar, date: NaiveDate) -> String {
    format!(
        "{}\n{}\n",
        date.format("%A, %B %-d %Y"),
        calendar.on_this_day(date)
    )
}
