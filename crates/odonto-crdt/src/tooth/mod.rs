//! Per-tooth CRDT state.

pub mod surface_crdt;
pub mod tooth_crdt;

pub use surface_crdt::SurfaceCRDT;
pub use tooth_crdt::ToothCRDT;
