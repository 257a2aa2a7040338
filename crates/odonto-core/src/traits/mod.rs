//! Seams between the engine and its collaborators.

mod event_log;
mod identity;
mod snapshot_store;

pub use event_log::IEventLog;
pub use identity::{IPatientResolver, IStaffAuthenticator};
pub use snapshot_store::ISnapshotStore;
