//! String sets and the category set algebra.
//!
//! Category lists arrive from feeds unsorted and with duplicates. Every
//! operation here returns a freshly allocated, deduplicated, ascending
//! sequence; no operation mutates its arguments.

use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// A hash-backed set of strings with deterministic (sorted) output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSet {
    items: HashSet<String>,
}

impl StringSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        StringSet {
            items: HashSet::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, s: &str) -> &mut Self {
        if !self.items.contains(s) {
            self.items.insert(s.to_string());
        }
        self
    }

    pub fn add_all<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for s in items {
            self.add(s.as_ref());
        }
        self
    }

    /// Removing an absent element is a no-op.
    pub fn remove(&mut self, s: &str) -> &mut Self {
        self.items.remove(s);
        self
    }

    pub fn contains(&self, s: &str) -> bool {
        self.items.contains(s)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements in ascending lexicographic order, recomputed on every call.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut ret: Vec<String> = self.items.iter().cloned().collect();
        ret.sort();
        ret
    }
}

impl<S: AsRef<str>> FromIterator<S> for StringSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = StringSet::new();
        set.add_all(iter);
        set
    }
}

// =============================================================================
// Set operations
// =============================================================================

/// Signature shared by the category set operations.
pub type SetOp = fn(&[String], &[String]) -> Vec<String>;

/// Every element appearing in `a` or `b`.
pub fn union(a: &[String], b: &[String]) -> Vec<String> {
    let mut set = StringSet::with_capacity(a.len() + b.len());
    set.add_all(a).add_all(b);
    set.to_sorted_vec()
}

/// Every element of `a` not present in `b`.
pub fn subtract(a: &[String], b: &[String]) -> Vec<String> {
    let mut set = StringSet::with_capacity(a.len());
    set.add_all(a);
    for s in b {
        set.remove(s);
    }
    set.to_sorted_vec()
}

/// Every element of `a` that is also present in `b`.
///
/// Candidates come from `a`, membership is tested against `b`. This is the
/// "limit to an allow-list" operation, with `b` as the allow-list.
pub fn intersect(a: &[String], b: &[String]) -> Vec<String> {
    let allowed: StringSet = b.iter().collect();
    let mut ret = StringSet::new();
    for s in a.iter().filter(|s| allowed.contains(s)) {
        ret.add(s);
    }
    ret.to_sorted_vec()
}

/// A named category set operation, as selected by `+`, `-` or `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryOp {
    Union,
    Subtract,
    Intersect,
}

impl CategoryOp {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(CategoryOp::Union),
            '-' => Some(CategoryOp::Subtract),
            '=' => Some(CategoryOp::Intersect),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            CategoryOp::Union => '+',
            CategoryOp::Subtract => '-',
            CategoryOp::Intersect => '=',
        }
    }

    pub fn set_op(&self) -> SetOp {
        match self {
            CategoryOp::Union => union,
            CategoryOp::Subtract => subtract,
            CategoryOp::Intersect => intersect,
        }
    }

    pub fn apply(&self, a: &[String], b: &[String]) -> Vec<String> {
        (self.set_op())(a, b)
    }
}

impl fmt::Display for CategoryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// =============================================================================
// Categories
// =============================================================================

/// An event's category tags: always deduplicated and sorted ascending.
///
/// The only way to build or change one is through constructors that restore
/// the invariant, so callers never have to re-sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Categories(Vec<String>);

impl Categories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Replace the tags with `op(self, tags)`.
    pub fn apply(&mut self, op: CategoryOp, tags: &[String]) {
        self.0 = op.apply(&self.0, tags);
    }
}

impl From<Vec<String>> for Categories {
    fn from(tags: Vec<String>) -> Self {
        let mut tags = tags;
        tags.sort();
        tags.dedup();
        Categories(tags)
    }
}

impl From<Categories> for Vec<String> {
    fn from(categories: Categories) -> Self {
        categories.0
    }
}

impl<S: Into<String>> FromIterator<S> for Categories {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Categories::from(iter.into_iter().map(Into::into).collect::<Vec<String>>())
    }
}

impl Deref for Categories {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Categories {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
