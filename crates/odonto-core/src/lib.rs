//! # odonto-core
//!
//! Foundation crate for the odontogram event log.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::OdontoConfig;
pub use errors::{OdontoError, OdontoResult};
pub use models::{
    Event, EventDraft, EventPayload, EventType, Snapshot, SnapshotView, StaffIdentity,
    StoredSnapshot, Surface, SurfaceState, ToothState,
};
