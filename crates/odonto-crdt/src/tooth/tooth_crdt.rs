//! Per-tooth CRDT: whole-tooth code set, general notes, surfaces.

use std::collections::BTreeMap;

use odonto_core::models::{EventPayload, Surface, ToothState};

use super::SurfaceCRDT;
use crate::primitives::{LWWRegister, Stamp, TombstoneSet};

/// Mutable merge state of one tooth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToothCRDT {
    pub codes: TombstoneSet,
    pub general_notes: LWWRegister<String>,
    pub surfaces: BTreeMap<Surface, SurfaceCRDT>,
}

impl ToothCRDT {
    /// Seed from a materialized tooth with every merge stamp reset to zero.
    pub fn seeded(state: &ToothState) -> Self {
        let mut codes = TombstoneSet::new();
        for code in &state.whole_tooth_code {
            codes.add(code, 0);
        }
        let surfaces = state
            .surfaces
            .iter()
            .map(|s| (s.surface, SurfaceCRDT::seeded(s)))
            .collect();
        Self {
            codes,
            general_notes: LWWRegister::seeded(state.general_notes.clone()),
            surfaces,
        }
    }

    /// Apply one decoded event payload at `stamp`.
    pub fn apply(&mut self, payload: &EventPayload, stamp: Stamp) {
        match payload {
            EventPayload::CodeInsert { codes } => {
                for code in codes {
                    self.codes.add(code, stamp.logical_timestamp);
                }
            }
            EventPayload::CodeRemove { codes } => {
                for code in codes {
                    self.codes.remove(code, stamp.logical_timestamp);
                }
            }
            EventPayload::GeneralNote { notes } => {
                self.general_notes.set(notes.clone(), stamp);
            }
            EventPayload::SurfaceCodeSet {
                surface,
                code,
                notes,
            } => {
                self.surfaces
                    .entry(*surface)
                    .or_insert_with(SurfaceCRDT::empty)
                    .set_code(code, notes.as_deref(), stamp);
            }
            EventPayload::SurfaceCodeRemove { surface } => {
                let newer = self
                    .surfaces
                    .get(surface)
                    .is_some_and(|s| stamp > s.record_stamp());
                if newer {
                    self.surfaces.remove(surface);
                }
            }
            EventPayload::SurfaceNote { surface, notes } => {
                self.surfaces
                    .entry(*surface)
                    .or_insert_with(SurfaceCRDT::empty)
                    .set_notes(notes, stamp);
            }
            // Unconditional: time-ordered application re-applies later events.
            EventPayload::Reset => *self = ToothCRDT::default(),
        }
    }

    pub fn materialize(&self) -> ToothState {
        ToothState {
            whole_tooth_code: self.codes.elements(),
            general_notes: self.general_notes.get().clone(),
            surfaces: self
                .surfaces
                .iter()
                .map(|(surface, state)| state.materialize(*surface))
                .collect(),
        }
    }
}
