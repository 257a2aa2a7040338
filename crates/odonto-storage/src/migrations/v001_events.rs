//! V001: the append-only event log.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS odontogram_events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id TEXT NOT NULL DEFAULT '',
    institution_id INTEGER NOT NULL,
    patient_id INTEGER NOT NULL,
    visit_id INTEGER,
    journey_point_id INTEGER,
    event_type TEXT NOT NULL,
    tooth_id TEXT NOT NULL,
    sequence_number INTEGER NOT NULL,
    logical_timestamp INTEGER NOT NULL,
    event_data TEXT NOT NULL,
    created_by_staff_id INTEGER NOT NULL,
    created_by TEXT NOT NULL,
    unix_timestamp INTEGER NOT NULL,
    create_time TEXT NOT NULL
) STRICT;

CREATE UNIQUE INDEX IF NOT EXISTS idx_events_patient_sequence
    ON odontogram_events(institution_id, patient_id, sequence_number);
CREATE INDEX IF NOT EXISTS idx_events_patient_tooth
    ON odontogram_events(institution_id, patient_id, tooth_id);
CREATE INDEX IF NOT EXISTS idx_events_event_id
    ON odontogram_events(event_id) WHERE event_id != '';
"#;
