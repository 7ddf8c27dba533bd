//! Multi-key event ordering.
//!
//! An ordering is a list of "less than" keys tried left to right: the first key
//! that distinguishes two events decides. When every key but the last ties,
//! the last key's raw answer is returned, so the final key settles residual
//! ties on its own. If that key is not itself a strict weak order the chain is
//! not transitive either; the default chain ends on `by_id`, which is.

use std::cmp::Ordering;

use crate::event::Event;

/// A strict "less than" over events. Must be free of side effects.
pub type LessFn = fn(&Event, &Event) -> bool;

/// Default key order: start, description, location, categories, summary, end, id.
pub const DEFAULT_KEYS: &[LessFn] = &[
    by_start,
    by_description,
    by_location,
    by_categories,
    by_summary,
    by_end,
    by_id,
];

/// A tie-break chain of comparator keys.
#[derive(Clone, Copy)]
pub struct EventOrdering<'a> {
    keys: &'a [LessFn],
}

impl Default for EventOrdering<'static> {
    fn default() -> Self {
        EventOrdering { keys: DEFAULT_KEYS }
    }
}

impl<'a> EventOrdering<'a> {
    pub fn new(keys: &'a [LessFn]) -> Self {
        EventOrdering { keys }
    }

    pub fn less(&self, a: &Event, b: &Event) -> bool {
        let Some((last, rest)) = self.keys.split_last() else {
            return false;
        };

        for key in rest {
            if key(a, b) {
                return true;
            }
            if key(b, a) {
                return false;
            }
        }

        last(a, b)
    }

    /// Derive an [`Ordering`] from [`less`](Self::less).
    ///
    /// Only a total order when the chain ends on a strict weak order. A last key
    /// that answers `true` both ways makes `compare` report `Less` for both
    /// argument orders, and [`sort`](Self::sort) may then panic.
    pub fn compare(&self, a: &Event, b: &Event) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Stable sort: events that compare equal keep their relative order.
    pub fn sort(&self, events: &mut [Event]) {
        events.sort_by(|a, b| self.compare(a, b));
    }
}

pub fn by_start(a: &Event, b: &Event) -> bool {
    a.start < b.start
}

/// Events without an end sort before events with one.
pub fn by_end(a: &Event, b: &Event) -> bool {
    a.end < b.end
}

pub fn by_id(a: &Event, b: &Event) -> bool {
    a.id < b.id
}

pub fn by_summary(a: &Event, b: &Event) -> bool {
    a.summary < b.summary
}

pub fn by_description(a: &Event, b: &Event) -> bool {
    a.description < b.description
}

pub fn by_location(a: &Event, b: &Event) -> bool {
    a.location < b.location
}

/// Element-wise lexicographic; a strict prefix sorts first.
pub fn by_categories(a: &Event, b: &Event) -> bool {
    a.categories.as_slice() < b.categories.as_slice()
}
