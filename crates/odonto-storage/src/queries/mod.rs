//! SQL for each table. Functions take a plain `&Connection` so they run the
//! same on a pooled reader, the writer, or inside a write session.

pub mod event_ops;
pub mod patient_ops;
pub mod snapshot_ops;
