//! Collection-level operations over `Events`.
//!
//! Filters and splits return new collections; only category edits work in place.

use chrono::{Datelike, NaiveDateTime};

use crate::date_range::DateRange;
use crate::event::{Event, Events};
use crate::ordering::{DEFAULT_KEYS, EventOrdering, LessFn};
use crate::string_set::{Categories, CategoryOp, StringSet};

impl Events {
    /// Sort with the default key order.
    pub fn sort(&mut self) -> &mut Self {
        self.sort_by_keys(DEFAULT_KEYS)
    }

    /// Sort with a custom key chain. The last key must be a strict weak order
    /// (irreflexive, transitive), as `by_id` is; see [`EventOrdering::compare`].
    pub fn sort_by_keys(&mut self, keys: &[LessFn]) -> &mut Self {
        EventOrdering::new(keys).sort(self);
        self
    }

    pub fn sorted(mut self) -> Self {
        self.sort();
        self
    }

    /// Keep events whose `extractor(start)` equals `value`.
    pub fn filter_time<F>(&self, extractor: F, value: i32) -> Events
    where
        F: Fn(&NaiveDateTime) -> i32,
    {
        self.iter()
            .filter(|e| extractor(&e.start) == value)
            .cloned()
            .collect()
    }

    /// Keep events overlapping the half-open window `[range.from, range.to)`.
    pub fn between(&self, range: &DateRange) -> Events {
        self.iter().filter(|e| range.overlaps(e)).cloned().collect()
    }

    /// Twelve buckets, index 0 = January, keyed by the month of `start` only.
    pub fn split_months(&self) -> Vec<Events> {
        let mut ret = vec![Events::new(); 12];
        for event in self.iter() {
            ret[event.start.month0() as usize].push(event.clone());
        }
        ret
    }

    /// Sort, then group consecutive events sharing the calendar day of `start`.
    ///
    /// Only days with at least one event get a bucket.
    pub fn split_days(&self) -> Vec<Events> {
        let sorted = self.clone().sorted();

        let mut ret: Vec<Events> = Vec::new();
        for event in sorted {
            match ret.last_mut() {
                Some(bucket) if bucket.last().is_some_and(|e| e.day_key() == event.day_key()) => {
                    bucket.push(event)
                }
                _ => ret.push(vec![event].into()),
            }
        }
        ret
    }

    /// Replace each event spanning several days with two single-day markers.
    ///
    /// The first stays on the start day with `start_prefix` before its summary;
    /// the second starts at the original end with `end_prefix`. Neither has an
    /// end. The result is sorted.
    pub fn split_long_events(&self, start_prefix: &str, end_prefix: &str) -> Events {
        let mut ret = Events::new();
        for event in self.iter() {
            match event.end {
                Some(end) if event.spans_days() => {
                    let mut first = event.clone();
                    first.end = None;
                    first.summary = format!("{}{}", start_prefix, event.summary);

                    let mut last = event.clone();
                    last.start = end;
                    last.end = None;
                    last.summary = format!("{}{}", end_prefix, event.summary);

                    ret.push(first);
                    ret.push(last);
                }
                _ => ret.push(event.clone()),
            }
        }
        ret.sorted()
    }

    /// Replace every event's categories with `op(categories, tags)`.
    ///
    /// An empty `tags` list leaves the events untouched.
    pub fn op_categories(&mut self, op: CategoryOp, tags: &[String]) -> &mut Self {
        if tags.is_empty() {
            return self;
        }
        for event in self.iter_mut() {
            event.categories.apply(op, tags);
        }
        self
    }

    /// Every category used by any event.
    pub fn distinct_categories(&self) -> Categories {
        let mut set = StringSet::new();
        for event in self.iter() {
            set.add_all(&event.categories);
        }
        set.to_sorted_vec().into()
    }
}

impl Event {
    /// Calendar day bucket key.
    pub fn day_key(&self) -> (i32, u32, u32) {
        (self.start.year(), self.start.month(), self.start.day())
    }
}
