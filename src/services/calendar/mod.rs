//! Consumer-facing calendar model.
//! Ties the event store, the date cursor and the change listeners together so
//! a presentation layer only talks to one object.

use chrono::{NaiveDate, NaiveTime};

use crate::error::CalendarResult;
use crate::models::event::Event;
use crate::models::time_interval::TimeInterval;
use crate::services::cursor::DateCursor;
use crate::services::event::EventStore;
use crate::services::notification::{CalendarChange, ChangeNotifier};

/// Shown by [`Calendar::on_this_day`] for a day without events
pub const NO_EVENTS_MESSAGE: &str = "There are no events scheduled for this day.";

#[derive(Debug, Default)]
pub struct Calendar {
    store: EventStore,
    cursor: DateCursor,
    listeners: ChangeNotifier,
}

impl Calendar {
    /// Calendar over `store`, positioned on today
    pub fn new(store: EventStore) -> Self {
        Self::with_cursor(store, DateCursor::today())
    }

    pub fn with_cursor(store: EventStore, cursor: DateCursor) -> Self {
        Self {
            store,
            cursor,
            listeners: ChangeNotifier::new(),
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn current_date(&self) -> NaiveDate {
        self.cursor.current()
    }

    /// Register a listener called after every navigation or event creation
    pub fn attach<F>(&mut self, listener: F)
    where
        F: FnMut(&CalendarChange) + 'static,
    {
        self.listeners.attach(listener);
    }

    pub fn has_month_changed(&self) -> bool {
        self.cursor.month_changed()
    }

    pub fn set_month_changed(&mut self, changed: bool) {
        self.cursor.set_month_changed(changed);
    }

    /// Step back one day
    pub fn prev(&mut self) -> CalendarResult<NaiveDate> {
        let (date, _) = self.cursor.retreat()?;
        self.notify_navigation();
        Ok(date)
    }

    /// Step forward one day
    pub fn next(&mut self) -> CalendarResult<NaiveDate> {
        let (date, _) = self.cursor.advance()?;
        self.notify_navigation();
        Ok(date)
    }

    /// Select a day of the current month
    pub fn set_current_day(&mut self, day: u32) -> CalendarResult<NaiveDate> {
        let date = self.cursor.jump_to_day(day)?;
        self.notify_navigation();
        Ok(date)
    }

    pub fn set_current_date(&mut self, date: NaiveDate) {
        self.cursor.jump_to_date(date);
        self.notify_navigation();
    }

    pub fn has_event(&self, date: NaiveDate) -> bool {
        self.store.has_event(date)
    }

    /// Create an event on the selected date.
    ///
    /// No conflict check happens here; see [`check_conflict`](Self::check_conflict).
    pub fn create_event(
        &mut self,
        name: impl Into<String>,
        start: NaiveTime,
        end: NaiveTime,
    ) -> CalendarResult<Event> {
        let event = self
            .store
            .create_event(self.cursor.current(), name, start, end)?;
        self.listeners.notify(&CalendarChange::EventCreated {
            event: event.clone(),
        });
        Ok(event)
    }

    /// True if `interval` collides with an event on the selected date
    pub fn check_conflict(&self, interval: &TimeInterval) -> bool {
        self.store.check_conflict(self.cursor.current(), interval)
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<Event> {
        self.store.events_on(date)
    }

    /// One `name: HH:MM - HH:MM` line per event on `date`, earliest first
    pub fn on_this_day(&self, date: NaiveDate) -> String {
        let events = self.store.events_on(date);
        if events.is_empty() {
            return NO_EVENTS_MESSAGE.to_string();
        }

        events
            .iter()
            .map(|e| format!("{}: {}", e.name(), e.interval()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Reported as a month change for as long as the consumer leaves the flag set
    fn notify_navigation(&mut self) {
        let date = self.cursor.current();
        let change = if self.cursor.month_changed() {
            CalendarChange::MonthChanged { date }
        } else {
            CalendarChange::DayChanged { date }
        };
        self.listeners.notify(&change);
    }
}
