//! # odonto-crdt
//!
//! CRDT merge rules for odontogram events, and the pure snapshot builder that
//! folds an event history into a deterministic [`Snapshot`](odonto_core::Snapshot).
//!
//! ## CRDT Primitives
//!
//! - [`Stamp`] - `(logical_timestamp, staff_id)` ordering key
//! - [`LWWRegister`] - last-writer-wins register keyed by [`Stamp`]
//! - [`TombstoneSet`] - set with per-element add timestamp and removal tombstone
//!
//! ## Higher-Level Structures
//!
//! - [`ToothCRDT`] - per-tooth state: code set, general notes, surfaces
//! - [`SnapshotBuilder`] - dedup, order, apply, materialize
//!
//! ## Guarantees
//!
//! For any multiset of events and a fixed seed, [`build_snapshot`] returns the
//! same snapshot regardless of input order or duplicated deliveries.

pub mod builder;
pub mod display;
pub mod primitives;
pub mod tooth;

// Re-export public API
pub use builder::{build_snapshot, merge_order, SnapshotBuilder};
pub use display::{lookup_display, CodeDisplay};
pub use primitives::{LWWRegister, Stamp, TombstoneSet};
pub use tooth::{SurfaceCRDT, ToothCRDT};
