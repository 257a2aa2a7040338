//! V002: the snapshot projection, one row per patient.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS odontogram_snapshots (
    patient_id INTEGER NOT NULL,
    institution_id INTEGER NOT NULL,
    snapshot_json TEXT NOT NULL,
    last_event_sequence INTEGER NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (patient_id, institution_id)
) STRICT;
"#;
