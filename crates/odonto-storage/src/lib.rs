//! # odonto-storage
//!
//! SQLite persistence: the append-only event log, the snapshot projection
//! and the patient directory. One serialized write connection, a pool of
//! read connections, WAL mode.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod session;

pub use engine::StorageEngine;
pub use session::WriteSession;

use odonto_core::errors::{OdontoError, StorageError};

/// Helper to convert any error message into an [`OdontoError::StorageError`].
pub fn to_storage_err(msg: String) -> OdontoError {
    OdontoError::StorageError(StorageError::SqliteError { message: msg })
}

pub(crate) fn corrupt_row(table: &'static str, details: impl Into<String>) -> OdontoError {
    OdontoError::StorageError(StorageError::CorruptRow {
        table,
        details: details.into(),
    })
}
