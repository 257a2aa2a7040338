//! V003: patient directory mapping external uuids to numeric ids.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    uuid TEXT NOT NULL,
    institution_id INTEGER NOT NULL,
    create_time TEXT NOT NULL,
    UNIQUE (uuid, institution_id)
) STRICT;
"#;
