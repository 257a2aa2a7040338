//! CRDT primitives used by the per-tooth state.

pub mod lww_register;
pub mod stamp;
pub mod tombstone_set;

pub use lww_register::LWWRegister;
pub use stamp::Stamp;
pub use tombstone_set::TombstoneSet;
