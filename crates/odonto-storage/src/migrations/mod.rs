//! Schema migrations tracked through `PRAGMA user_version`.
//!
//! Each migration runs in its own transaction and bumps `user_version` on
//! success, so re-opening a database only applies what is missing.

mod v001_events;
mod v002_snapshots;
mod v003_patients;

use rusqlite::Connection;

use odonto_core::errors::{OdontoResult, StorageError};

use crate::to_storage_err;

/// Ordered list of `(version, sql)`.
const MIGRATIONS: &[(u32, &str)] = &[
    (1, v001_events::MIGRATION_SQL),
    (2, v002_snapshots::MIGRATION_SQL),
    (3, v003_patients::MIGRATION_SQL),
];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 3;

/// Current `user_version` of the database.
pub fn current_version(conn: &Connection) -> OdontoResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every pending migration. Returns the number applied.
pub fn run_migrations(conn: &Connection) -> OdontoResult<usize> {
    let current = current_version(conn)?;
    let mut applied = 0;

    for &(version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let batch = format!("BEGIN IMMEDIATE;\n{sql}\nPRAGMA user_version = {version};\nCOMMIT;");
        if let Err(e) = conn.execute_batch(&batch) {
            let _ = conn.execute_batch("ROLLBACK");
            return Err(StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            }
            .into());
        }
        tracing::info!(version = version, "applied migration");
        applied += 1;
    }

    Ok(applied)
}
