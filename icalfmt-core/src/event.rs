//! Normalized calendar events.
//!
//! An `Event` is built once by the normalizer. Afterwards only its categories
//! change in place; splitting produces new events instead of editing old ones.

use std::ops::{Deref, DerefMut};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::string_set::Categories;

/// A single calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub start: NaiveDateTime,
    /// Inclusive end. `None` for events without an end and for zero-length intervals.
    pub end: Option<NaiveDateTime>,
    /// True when DTSTART carried only a date.
    pub all_day: bool,
    pub id: String,
    pub description: String,
    pub location: String,
    pub summary: String,
    pub categories: Categories,
}

impl Event {
    pub fn new(start: NaiveDateTime) -> Self {
        Event {
            start,
            end: None,
            all_day: false,
            id: String::new(),
            description: String::new(),
            location: String::new(),
            summary: String::new(),
            categories: Categories::new(),
        }
    }

    pub fn has_end(&self) -> bool {
        self.end.is_some()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end.map(|end| end.date())
    }

    /// Whether the event ends on a later calendar day than it starts.
    pub fn spans_days(&self) -> bool {
        self.end_date().is_some_and(|end| end != self.start_date())
    }
}

/// An ordered collection of events.
///
/// Insertion order carries no meaning until [`Events::sort`] has run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Events(Vec<Event>);

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.0.push(event);
    }

    pub fn into_vec(self) -> Vec<Event> {
        self.0
    }
}

impl From<Vec<Event>> for Events {
    fn from(events: Vec<Event>) -> Self {
        Events(events)
    }
}

impl FromIterator<Event> for Events {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Events(iter.into_iter().collect())
    }
}

impl Extend<Event> for Events {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Events {
    type Item = Event;
    type IntoIter = std::vec::IntoIter<Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Events {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Deref for Events {
    type Target = [Event];

    fn deref(&self) -> &[Event] {
        &self.0
    }
}

impl DerefMut for Events {
    fn deref_mut(&mut self) -> &mut [Event] {
        &mut self.0
    }
}
