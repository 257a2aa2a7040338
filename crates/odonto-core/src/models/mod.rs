//! Domain models: events, payloads, teeth, snapshots, queries, identities.

pub mod event;
pub mod payload;
pub mod query;
pub mod snapshot;
pub mod staff;
pub mod tooth;

pub use event::{Event, EventDraft, EventType};
pub use payload::EventPayload;
pub use query::{EventFilter, EventPage, PatientCounters};
pub use snapshot::{Snapshot, SnapshotSource, SnapshotView, StoredSnapshot, SurfaceState, ToothState};
pub use staff::StaffIdentity;
pub use tooth::{validate_code, validate_fdi_tooth, Surface};
