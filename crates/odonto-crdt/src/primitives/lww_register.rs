//! Last-Writer-Wins Register (LWW-Register) CRDT.
//!
//! Each update carries a [`Stamp`]. A write lands only when its stamp beats
//! the current one: higher logical timestamp wins, equal timestamps fall
//! back to the higher staff id.
//!
//! Used for: tooth `general_notes`, surface `code`, surface `notes`.
//!
//! # Examples
//!
//! ```
//! use odonto_crdt::{LWWRegister, Stamp};
//!
//! let mut notes = LWWRegister::new("cavity".to_string(), Stamp::new(20, 1));
//!
//! assert!(notes.set("filled".to_string(), Stamp::new(20, 2)));
//! assert!(!notes.set("stale".to_string(), Stamp::new(19, 9)));
//! assert_eq!(notes.get(), "filled");
//! ```

use serde::{Deserialize, Serialize};

use super::Stamp;

/// A last-writer-wins register keyed by [`Stamp`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LWWRegister<T> {
    value: T,
    stamp: Stamp,
}

impl<T: Clone> LWWRegister<T> {
    /// Create a new LWW-Register with an initial value.
    pub fn new(value: T, stamp: Stamp) -> Self {
        Self { value, stamp }
    }

    /// A register holding a seeded value that any real write overrides.
    pub fn seeded(value: T) -> Self {
        Self::new(value, Stamp::ZERO)
    }

    /// Update the value only if `stamp` is greater than the current one.
    /// Returns whether the write was applied.
    pub fn set(&mut self, value: T, stamp: Stamp) -> bool {
        if stamp > self.stamp {
            self.value = value;
            self.stamp = stamp;
            true
        } else {
            false
        }
    }

    /// Get a reference to the current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Stamp of the current value.
    pub fn stamp(&self) -> Stamp {
        self.stamp
    }
}

impl<T: Clone + Default> Default for LWWRegister<T> {
    fn default() -> Self {
        Self::seeded(T::default())
    }
}
