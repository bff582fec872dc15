//! Calendar event store.
//! Keeps events grouped by date and answers per-day queries; the text
//! codec and file persistence live in their own submodules.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

use crate::error::CalendarResult;
use crate::models::event::Event;
use crate::models::time_interval::TimeInterval;

pub mod codec;
pub mod persistence;

/// In-memory mapping from calendar date to the events on that date.
///
/// Each day's list keeps insertion order; reads that need time order sort a copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    events: BTreeMap<NaiveDate, Vec<Event>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if at least one event is scheduled on `date`.
    pub fn has_event(&self, date: NaiveDate) -> bool {
        self.events.get(&date).is_some_and(|list| !list.is_empty())
    }

    /// Validate and append a new event to `date`.
    ///
    /// Overlaps are not rejected here; callers that care run
    /// [`check_conflict`](Self::check_conflict) first.
    pub fn create_event(
        &mut self,
        date: NaiveDate,
        name: impl Into<String>,
        start: NaiveTime,
        end: NaiveTime,
    ) -> CalendarResult<Event> {
        let event = Event::new(name, date, start, end)?;
        log::debug!(
            "Creating event '{}' on {} ({})",
            event.name(),
            date,
            event.interval()
        );
        self.insert(event.clone());
        Ok(event)
    }

    /// Append an already validated event.
    pub fn insert(&mut self, event: Event) {
        self.events.entry(event.date()).or_default().push(event);
    }

    /// Events on `date` ordered by start time, ties kept in insertion order.
    pub fn events_on(&self, date: NaiveDate) -> Vec<Event> {
        let mut events = self.events.get(&date).cloned().unwrap_or_default();
        events.sort_by_key(Event::start);
        events
    }

    /// True if `interval` overlaps any event already on `date`.
    pub fn check_conflict(&self, date: NaiveDate, interval: &TimeInterval) -> bool {
        self.events
            .get(&date)
            .is_some_and(|list| list.iter().any(|event| event.conflicts_with(interval)))
    }

    /// Total number of events across all dates.
    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dates that carry at least one event, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.events
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(date, _)| *date)
    }

    /// Every event, by ascending date and then insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.values().flatten()
    }
}

impl FromIterator<Event> for EventStore {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        let mut store = Self::new();
        for event in iter {
            store.insert(event);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn interval(start: NaiveTime, end: NaiveTime) -> TimeInterval {
        TimeInterval::new(start, end).unwrap()
    }

    #[test]
    fn test_empty_store() {
        let store = EventStore::new();
        assert!(store.is_empty());
        assert!(!store.has_event(date()));
        assert!(store.events_on(date()).is_empty());
    }

    #[test]
    fn test_create_event() {
        let mut store = EventStore::new();

        let created = store.create_event(date(), "Review", t(14, 0), t(15, 0)).unwrap();

        assert_eq!(created.name(), "Review");
        assert!(store.has_event(date()));
        assert_eq!(store.len(), 1);

        let listed = store.events_on(date());
        assert_eq!(listed.iter().filter(|e| **e == created).count(), 1);
    }

    #[test]
    fn test_create_event_invalid_interval_leaves_store_untouched() {
        let mut store = EventStore::new();

        let result = store.create_event(date(), "Backwards", t(15, 0), t(14, 0));

        assert!(result.is_err());
        assert!(store.is_empty());
        assert!(!store.has_event(date()));
    }

    #[test]
    fn test_create_event_allows_overlap() {
        let mut store = EventStore::new();
        store.create_event(date(), "A", t(9, 0), t(10, 0)).unwrap();
        store.create_event(date(), "B", t(9, 30), t(10, 30)).unwrap();

        assert_eq!(store.events_on(date()).len(), 2);
    }

    #[test]
    fn test_events_on_sorted_by_start() {
        let mut store = EventStore::new();
        store.create_event(date(), "Late", t(16, 0), t(17, 0)).unwrap();
        store.create_event(date(), "Early", t(8, 0), t(9, 0)).unwrap();
        store.create_event(date(), "Noon", t(12, 0), t(13, 0)).unwrap();

        let names: Vec<_> = store
            .events_on(date())
            .iter()
            .map(|e| e.name().to_string())
            .collect();

        assert_eq!(names, vec!["Early", "Noon", "Late"]);
    }

    #[test]
    fn test_events_on_is_stable_for_equal_starts() {
        let mut store = EventStore::new();
        store.create_event(date(), "First", t(9, 0), t(11, 0)).unwrap();
        store.create_event(date(), "Earlier", t(8, 0), t(8, 30)).unwrap();
        store.create_event(date(), "Second", t(9, 0), t(9, 30)).unwrap();

        let names: Vec<_> = store
            .events_on(date())
            .iter()
            .map(|e| e.name().to_string())
            .collect();

        assert_eq!(names, vec!["Earlier", "First", "Second"]);
    }

    #[test]
    fn test_events_on_does_not_reorder_storage() {
        let mut store = EventStore::new();
        store.create_event(date(), "Late", t(16, 0), t(17, 0)).unwrap();
        store.create_event(date(), "Early", t(8, 0), t(9, 0)).unwrap();

        let _ = store.events_on(date());

        let stored: Vec<_> = store.iter().map(|e| e.name()).collect();
        assert_eq!(stored, vec!["Late", "Early"]);
    }

    #[test]
    fn test_check_conflict_scenario() {
        let mut store = EventStore::new();

        assert!(!store.check_conflict(date(), &interval(t(9, 0), t(10, 0))));

        store.create_event(date(), "A", t(9, 0), t(10, 0)).unwrap();

        assert!(store.check_conflict(date(), &interval(t(9, 30), t(9, 45))));
        assert!(!store.check_conflict(date(), &interval(t(10, 0), t(11, 0))));
    }

    #[test]
    fn test_check_conflict_only_same_day() {
        let mut store = EventStore::new();
        store.create_event(date(), "A", t(9, 0), t(10, 0)).unwrap();

        let other_day = date().succ_opt().unwrap();
        assert!(!store.check_conflict(other_day, &interval(t(9, 0), t(10, 0))));
    }

    #[test]
    fn test_dates_and_iter_follow_date_order() {
        let later = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        let mut store = EventStore::new();
        store.create_event(later, "Later", t(9, 0), t(10, 0)).unwrap();
        store.create_event(earlier, "Earlier", t(9, 0), t(10, 0)).unwrap();

        assert_eq!(store.dates().collect::<Vec<_>>(), vec![earlier, later]);
        assert_eq!(
            store.iter().map(|e| e.name()).collect::<Vec<_>>(),
            vec!["Earlier", "Later"]
        );
    }

    #[test]
    fn test_from_iterator() {
        let events = vec![
            Event::new("A", date(), t(9, 0), t(10, 0)).unwrap(),
            Event::new("B", date(), t(11, 0), t(12, 0)).unwrap(),
        ];

        let store: EventStore = events.into_iter().collect();
        assert_eq!(store.len(), 2);
        assert!(store.has_event(date()));
    }
}
