//! Queries for the `patients` table.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use odonto_core::errors::OdontoResult;

use crate::to_storage_err;

pub fn find_patient(conn: &Connection, uuid: &str, institution_id: i64) -> OdontoResult<Option<i64>> {
    conn.prepare_cached("SELECT id FROM patients WHERE uuid = ?1 AND institution_id = ?2")
        .and_then(|mut stmt| {
            stmt.query_row(params![uuid, institution_id], |row| row.get(0))
                .optional()
        })
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Register a patient, returning its id. Idempotent per `(uuid, institution)`.
pub fn register_patient(conn: &Connection, uuid: &str, institution_id: i64) -> OdontoResult<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO patients (uuid, institution_id, create_time) VALUES (?1, ?2, ?3)",
        params![uuid, institution_id, Utc::now().to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    conn.query_row(
        "SELECT id FROM patients WHERE uuid = ?1 AND institution_id = ?2",
        params![uuid, institution_id],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
