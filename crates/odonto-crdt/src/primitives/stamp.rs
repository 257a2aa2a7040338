use serde::{Deserialize, Serialize};

use odonto_core::Event;

/// Ordering key of a write: logical timestamp first, staff id as tie-break.
///
/// Field order matters: the derived `Ord` compares `logical_timestamp`
/// before `staff_id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Stamp {
    pub logical_timestamp: i64,
    pub staff_id: i64,
}

impl Stamp {
    /// Provenance of seeded values. Loses against every real event.
    pub const ZERO: Stamp = Stamp {
        logical_timestamp: 0,
        staff_id: 0,
    };

    pub fn new(logical_timestamp: i64, staff_id: i64) -> Self {
        Self {
            logical_timestamp,
            staff_id,
        }
    }

    pub fn of(event: &Event) -> Self {
        Self::new(event.logical_timestamp, event.created_by_staff_id)
    }
}
