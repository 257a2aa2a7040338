//! # odonto-engine
//!
//! Write and read paths of the odontogram log.
//!
//! - [`writer`] validates drafts and appends them inside a write session
//! - [`SnapshotCache`] holds recent snapshots with a TTL
//! - [`orchestrator`] serves snapshot reads from cache, store or rebuild
//! - [`incremental`] folds freshly appended events into the stored snapshot
//! - [`OdontogramEngine`] wires these together

pub mod cache;
pub mod engine;
pub mod incremental;
pub mod orchestrator;
pub mod writer;

pub use cache::{CacheKey, SnapshotCache};
pub use engine::OdontogramEngine;
