//! Queries for the `odontogram_snapshots` table.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use odonto_core::errors::OdontoResult;
use odonto_core::{Snapshot, StoredSnapshot};

use crate::{corrupt_row, to_storage_err};

const TABLE: &str = "odontogram_snapshots";

pub fn get_snapshot(
    conn: &Connection,
    institution_id: i64,
    patient_id: i64,
) -> OdontoResult<Option<StoredSnapshot>> {
    let row: Option<(String, String)> = conn
        .prepare_cached(
            "SELECT snapshot_json, updated_at FROM odontogram_snapshots
             WHERE patient_id = ?1 AND institution_id = ?2",
        )
        .and_then(|mut stmt| {
            stmt.query_row(params![patient_id, institution_id], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some((json, updated_at)) = row else {
        return Ok(None);
    };
    let snapshot: Snapshot = serde_json::from_str(&json)
        .map_err(|e| corrupt_row(TABLE, format!("snapshot of patient {patient_id}: {e}")))?;
    let updated_at = DateTime::parse_from_rfc3339(&updated_at)
        .map_err(|e| corrupt_row(TABLE, format!("updated_at of patient {patient_id}: {e}")))?
        .with_timezone(&Utc);

    Ok(Some(StoredSnapshot {
        institution_id,
        patient_id,
        snapshot,
        updated_at,
    }))
}

/// Insert or replace the patient's snapshot row.
pub fn upsert_snapshot(
    conn: &Connection,
    institution_id: i64,
    patient_id: i64,
    snapshot: &Snapshot,
) -> OdontoResult<()> {
    let json = serde_json::to_string(snapshot)?;
    conn.execute(
        "INSERT INTO odontogram_snapshots
            (patient_id, institution_id, snapshot_json, last_event_sequence, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT (patient_id, institution_id) DO UPDATE SET
            snapshot_json = excluded.snapshot_json,
            last_event_sequence = excluded.last_event_sequence,
            updated_at = excluded.updated_at",
        params![
            patient_id,
            institution_id,
            json,
            snapshot.last_event_sequence,
            Utc::now().to_rfc3339()
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
