//! Day-granularity date navigation.

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{CalendarError, CalendarResult};
use crate::utils::date::{is_same_month, last_day_of_month};

/// Holds the selected date and remembers whether navigation crossed a month.
///
/// The month flag is sticky: navigation only ever sets it, and the consumer
/// clears it with [`set_month_changed`](Self::set_month_changed) once it has
/// redrawn the month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCursor {
    current: NaiveDate,
    month_changed: bool,
}

impl Default for DateCursor {
    fn default() -> Self {
        Self::today()
    }
}

impl DateCursor {
    pub fn new(current: NaiveDate) -> Self {
        Self {
            current,
            month_changed: false,
        }
    }

    /// Cursor positioned on the local current date
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn current(&self) -> NaiveDate {
        self.current
    }

    pub fn month_changed(&self) -> bool {
        self.month_changed
    }

    pub fn set_month_changed(&mut self, changed: bool) {
        self.month_changed = changed;
    }

    /// Move forward one day. Returns the new date and whether the month changed.
    pub fn advance(&mut self) -> CalendarResult<(NaiveDate, bool)> {
        let next = self.current.succ_opt().ok_or(CalendarError::DateOutOfRange)?;
        Ok(self.move_to(next))
    }

    /// Move back one day. Returns the new date and whether the month changed.
    pub fn retreat(&mut self) -> CalendarResult<(NaiveDate, bool)> {
        let prev = self.current.pred_opt().ok_or(CalendarError::DateOutOfRange)?;
        Ok(self.move_to(prev))
    }

    /// Select `day` within the current month.
    pub fn jump_to_day(&mut self, day: u32) -> CalendarResult<NaiveDate> {
        let (year, month) = (self.current.year(), self.current.month());
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(CalendarError::InvalidDay { year, month, day })?;
        self.current = date;
        Ok(date)
    }

    /// Select an arbitrary date. Returns whether the month changed.
    pub fn jump_to_date(&mut self, date: NaiveDate) -> bool {
        self.move_to(date).1
    }

    /// Number of days in the current month
    pub fn days_in_month(&self) -> u32 {
        last_day_of_month(self.current.year(), self.current.month()).unwrap_or(28)
    }

    fn move_to(&mut self, date: NaiveDate) -> (NaiveDate, bool) {
        let crossed = !is_same_month(self.current, date);
        if crossed {
            self.month_changed = true;
        }
        self.current = date;
        (date, crossed)
    }
}
