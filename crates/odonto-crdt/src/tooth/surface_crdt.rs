//! One tooth surface: independently stamped `code` and `notes` sub-fields.

use odonto_core::models::{Surface, SurfaceState};

use crate::display::lookup_display;
use crate::primitives::{LWWRegister, Stamp};

/// CRDT state of a single surface.
///
/// `code` and `notes` carry their own merge stamps. `recorded` is the
/// provenance shown to readers: the stamp of the latest real write, which
/// survives reseeding even though the merge stamps are reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceCRDT {
    pub code: LWWRegister<String>,
    pub notes: LWWRegister<String>,
    recorded: Stamp,
}

impl SurfaceCRDT {
    pub fn empty() -> Self {
        Self {
            code: LWWRegister::default(),
            notes: LWWRegister::default(),
            recorded: Stamp::ZERO,
        }
    }

    /// Seed from a materialized surface with merge stamps reset to zero.
    pub fn seeded(state: &SurfaceState) -> Self {
        Self {
            code: LWWRegister::seeded(state.code.clone()),
            notes: LWWRegister::seeded(state.notes.clone()),
            recorded: Stamp::new(state.logical_timestamp, state.created_by_staff_id),
        }
    }

    /// Newest merge stamp of either sub-field.
    pub fn record_stamp(&self) -> Stamp {
        self.code.stamp().max(self.notes.stamp())
    }

    /// Write `code`. Notes older than `stamp` are replaced by the carried
    /// notes, or cleared when the payload has none.
    pub fn set_code(&mut self, code: &str, notes: Option<&str>, stamp: Stamp) {
        let mut applied = self.code.set(code.to_string(), stamp);
        applied |= self.notes.set(notes.unwrap_or_default().to_string(), stamp);
        if applied {
            self.touch(stamp);
        }
    }

    pub fn set_notes(&mut self, notes: &str, stamp: Stamp) {
        if self.notes.set(notes.to_string(), stamp) {
            self.touch(stamp);
        }
    }

    fn touch(&mut self, stamp: Stamp) {
        self.recorded = self.recorded.max(stamp);
    }

    pub fn materialize(&self, surface: Surface) -> SurfaceState {
        let display = lookup_display(self.code.get());
        SurfaceState {
            surface,
            code: self.code.get().clone(),
            notes: self.notes.get().clone(),
            logical_timestamp: self.recorded.logical_timestamp,
            created_by_staff_id: self.recorded.staff_id,
            display_name: display.name,
            color: display.color.to_string(),
            pattern: display.pattern.to_string(),
        }
    }
}
