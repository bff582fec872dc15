use std::fmt;

use chrono::NaiveDate;

use crate::models::event::Event;

/// What changed in the calendar state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarChange {
    /// The selected day moved within the same month
    DayChanged { date: NaiveDate },
    /// The selected day moved into another month; the grid must be redrawn
    MonthChanged { date: NaiveDate },
    /// A new event was stored
    EventCreated { event: Event },
}

impl CalendarChange {
    pub fn is_month_change(&self) -> bool {
        matches!(self, CalendarChange::MonthChanged { .. })
    }
}

type Listener = Box<dyn FnMut(&CalendarChange)>;

/// Ordered list of change listeners, called synchronously
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Vec<Listener>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; listeners run in registration order
    pub fn attach<F>(&mut self, listener: F)
    where
        F: FnMut(&CalendarChange) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Deliver `change` to every listener before returning
    pub fn notify(&mut self, change: &CalendarChange) {
        log::trace!("Notifying {} listener(s): {:?}", self.listeners.len(), change);
        for listener in &mut self.listeners {
            listener(change);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
