//! Set CRDT with per-element add timestamp and removal tombstone.
//!
//! An element is present when its latest add is strictly newer than its
//! latest removal. A removal at or after an add hides the element; a later
//! add reinstates it. Both timestamps only grow, so the outcome does not
//! depend on the order operations arrive in.
//!
//! Used for: whole-tooth codes.
//!
//! # Examples
//!
//! ```
//! use odonto_crdt::TombstoneSet;
//!
//! let mut codes = TombstoneSet::new();
//! codes.add("amf", 100);
//! codes.remove("amf", 200);
//! assert!(!codes.contains("amf"));
//!
//! codes.add("amf", 300);
//! assert!(codes.contains("amf"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Marks {
    added: Option<i64>,
    removed: Option<i64>,
}

impl Marks {
    fn is_present(&self) -> bool {
        match (self.added, self.removed) {
            (Some(added), Some(removed)) => added > removed,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// Add/remove set keyed by element, with timestamps per element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TombstoneSet {
    entries: BTreeMap<String, Marks>,
}

impl TombstoneSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an add at `timestamp`.
    pub fn add(&mut self, element: &str, timestamp: i64) {
        let marks = self.entries.entry(element.to_string()).or_default();
        marks.added = Some(marks.added.map_or(timestamp, |t| t.max(timestamp)));
    }

    /// Record a removal tombstone at `timestamp`.
    pub fn remove(&mut self, element: &str, timestamp: i64) {
        let marks = self.entries.entry(element.to_string()).or_default();
        marks.removed = Some(marks.removed.map_or(timestamp, |t| t.max(timestamp)));
    }

    pub fn contains(&self, element: &str) -> bool {
        self.entries.get(element).is_some_and(Marks::is_present)
    }

    /// Present elements in lexicographic order.
    pub fn elements(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, marks)| marks.is_present())
            .map(|(element, _)| element.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.values().filter(|m| m.is_present()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
