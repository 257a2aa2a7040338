//! Queries for the `odontogram_events` table.

use chrono::{DateTime, Utc};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, Row};

use odonto_core::errors::{NotFoundError, OdontoResult};
use odonto_core::models::{EventFilter, EventPage, PatientCounters};
use odonto_core::{Event, EventType};

use crate::{corrupt_row, to_storage_err};

const TABLE: &str = "odontogram_events";

const COLUMNS: &str = "event_id, institution_id, patient_id, visit_id, journey_point_id,
    event_type, tooth_id, sequence_number, logical_timestamp, event_data,
    created_by_staff_id, created_by, unix_timestamp, create_time";

/// Rows per multi-row INSERT, keeping the bound parameter count well under
/// SQLite's variable limit.
const INSERT_CHUNK: usize = 500;

/// Column values as read, before decoding into an [`Event`].
struct RawEvent {
    event_id: String,
    institution_id: i64,
    patient_id: i64,
    visit_id: Option<i64>,
    journey_point_id: Option<i64>,
    event_type: String,
    tooth_id: String,
    sequence_number: i64,
    logical_timestamp: i64,
    event_data: String,
    created_by_staff_id: i64,
    created_by: String,
    unix_timestamp: i64,
    create_time: String,
}

impl RawEvent {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            event_id: row.get(0)?,
            institution_id: row.get(1)?,
            patient_id: row.get(2)?,
            visit_id: row.get(3)?,
            journey_point_id: row.get(4)?,
            event_type: row.get(5)?,
            tooth_id: row.get(6)?,
            sequence_number: row.get(7)?,
            logical_timestamp: row.get(8)?,
            event_data: row.get(9)?,
            created_by_staff_id: row.get(10)?,
            created_by: row.get(11)?,
            unix_timestamp: row.get(12)?,
            create_time: row.get(13)?,
        })
    }

    fn into_event(self) -> OdontoResult<Event> {
        let event_type: EventType = self
            .event_type
            .parse()
            .map_err(|_| corrupt_row(TABLE, format!("unknown event_type {:?}", self.event_type)))?;
        let event_data = serde_json::from_str(&self.event_data)
            .map_err(|e| corrupt_row(TABLE, format!("event_data of {:?}: {e}", self.event_id)))?;
        let create_time = DateTime::parse_from_rfc3339(&self.create_time)
            .map_err(|e| corrupt_row(TABLE, format!("create_time of {:?}: {e}", self.event_id)))?
            .with_timezone(&Utc);
        Ok(Event {
            event_id: self.event_id,
            institution_id: self.institution_id,
            patient_id: self.patient_id,
            visit_id: self.visit_id,
            journey_point_id: self.journey_point_id,
            event_type,
            tooth_id: self.tooth_id,
            sequence_number: self.sequence_number,
            logical_timestamp: self.logical_timestamp,
            event_data,
            created_by_staff_id: self.created_by_staff_id,
            created_by: self.created_by,
            unix_timestamp: self.unix_timestamp,
            create_time,
        })
    }
}

/// Current maxima of both counters for one patient.
pub fn counters(conn: &Connection, institution_id: i64, patient_id: i64) -> OdontoResult<PatientCounters> {
    conn.prepare_cached(
        "SELECT COALESCE(MAX(sequence_number), 0), COALESCE(MAX(logical_timestamp), 0)
         FROM odontogram_events WHERE institution_id = ?1 AND patient_id = ?2",
    )
    .and_then(|mut stmt| {
        stmt.query_row(params![institution_id, patient_id], |row| {
            Ok(PatientCounters {
                max_sequence_number: row.get(0)?,
                max_logical_timestamp: row.get(1)?,
            })
        })
    })
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn max_sequence(conn: &Connection, institution_id: i64, patient_id: i64) -> OdontoResult<i64> {
    conn.prepare_cached(
        "SELECT COALESCE(MAX(sequence_number), 0)
         FROM odontogram_events WHERE institution_id = ?1 AND patient_id = ?2",
    )
    .and_then(|mut stmt| stmt.query_row(params![institution_id, patient_id], |row| row.get(0)))
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Insert a batch of fully-stamped events with multi-row INSERTs.
pub fn insert_events(conn: &Connection, events: &[Event]) -> OdontoResult<usize> {
    for chunk in events.chunks(INSERT_CHUNK) {
        let placeholders = vec!["(?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"; chunk.len()].join(", ");
        let sql = format!("INSERT INTO odontogram_events ({COLUMNS}) VALUES {placeholders}");

        let mut values: Vec<SqlValue> = Vec::with_capacity(chunk.len() * 14);
        for e in chunk {
            values.extend([
                SqlValue::Text(e.event_id.clone()),
                SqlValue::Integer(e.institution_id),
                SqlValue::Integer(e.patient_id),
                e.visit_id.map_or(SqlValue::Null, SqlValue::Integer),
                e.journey_point_id.map_or(SqlValue::Null, SqlValue::Integer),
                SqlValue::Text(e.event_type.as_str().to_string()),
                SqlValue::Text(e.tooth_id.clone()),
                SqlValue::Integer(e.sequence_number),
                SqlValue::Integer(e.logical_timestamp),
                SqlValue::Text(serde_json::to_string(&e.event_data)?),
                SqlValue::Integer(e.created_by_staff_id),
                SqlValue::Text(e.created_by.clone()),
                SqlValue::Integer(e.unix_timestamp),
                SqlValue::Text(e.create_time.to_rfc3339()),
            ]);
        }

        conn.execute(&sql, params_from_iter(values))
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(events.len())
}

/// Events with `sequence_number <= max_sequence`, in sequence order.
pub fn events_up_to(
    conn: &Connection,
    institution_id: i64,
    patient_id: i64,
    max_sequence: i64,
) -> OdontoResult<Vec<Event>> {
    query_events(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM odontogram_events
             WHERE institution_id = ?1 AND patient_id = ?2 AND sequence_number <= ?3
             ORDER BY sequence_number ASC"
        ),
        vec![
            SqlValue::Integer(institution_id),
            SqlValue::Integer(patient_id),
            SqlValue::Integer(max_sequence),
        ],
    )
}

/// Events with `after < sequence_number < before`, in sequence order.
pub fn events_between(
    conn: &Connection,
    institution_id: i64,
    patient_id: i64,
    after: i64,
    before: i64,
) -> OdontoResult<Vec<Event>> {
    query_events(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM odontogram_events
             WHERE institution_id = ?1 AND patient_id = ?2
               AND sequence_number > ?3 AND sequence_number < ?4
             ORDER BY sequence_number ASC"
        ),
        vec![
            SqlValue::Integer(institution_id),
            SqlValue::Integer(patient_id),
            SqlValue::Integer(after),
            SqlValue::Integer(before),
        ],
    )
}

/// Whether the patient has an event with this id.
pub fn event_exists(
    conn: &Connection,
    institution_id: i64,
    patient_id: i64,
    event_id: &str,
) -> OdontoResult<bool> {
    conn.prepare_cached(
        "SELECT EXISTS(SELECT 1 FROM odontogram_events
         WHERE institution_id = ?1 AND patient_id = ?2 AND event_id = ?3)",
    )
    .and_then(|mut stmt| {
        stmt.query_row(params![institution_id, patient_id, event_id], |row| row.get(0))
    })
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Filtered, paginated listing ordered by sequence number.
///
/// An `event_id` filter naming an event the patient does not have is a
/// not-found error rather than an empty page.
pub fn list_events(
    conn: &Connection,
    institution_id: i64,
    patient_id: i64,
    filter: &EventFilter,
) -> OdontoResult<EventPage> {
    if let Some(event_id) = &filter.event_id {
        if !event_exists(conn, institution_id, patient_id, event_id)? {
            return Err(NotFoundError::Event(event_id.clone()).into());
        }
    }

    let mut clauses = vec!["institution_id = ?", "patient_id = ?"];
    let mut values = vec![SqlValue::Integer(institution_id), SqlValue::Integer(patient_id)];

    if let Some(tooth_id) = &filter.tooth_id {
        clauses.push("tooth_id = ?");
        values.push(SqlValue::Text(tooth_id.clone()));
    }
    if let Some(event_type) = filter.event_type {
        clauses.push("event_type = ?");
        values.push(SqlValue::Text(event_type.as_str().to_string()));
    }
    if let Some(visit_id) = filter.visit_id {
        clauses.push("visit_id = ?");
        values.push(SqlValue::Integer(visit_id));
    }
    if let Some(from) = filter.from_sequence {
        clauses.push("sequence_number >= ?");
        values.push(SqlValue::Integer(from));
    }
    if let Some(to) = filter.to_sequence {
        clauses.push("sequence_number <= ?");
        values.push(SqlValue::Integer(to));
    }
    if let Some(event_id) = &filter.event_id {
        clauses.push("event_id = ?");
        values.push(SqlValue::Text(event_id.clone()));
    }
    let where_clause = clauses.join(" AND ");

    let total: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM odontogram_events WHERE {where_clause}"),
            params_from_iter(values.iter()),
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut page_values = values;
    // Saturate: a wrapped offset would turn negative, which SQLite reads as 0.
    page_values.push(SqlValue::Integer(i64::try_from(filter.limit).unwrap_or(i64::MAX)));
    page_values.push(SqlValue::Integer(i64::try_from(filter.offset).unwrap_or(i64::MAX)));
    let events = query_events(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM odontogram_events WHERE {where_clause}
             ORDER BY sequence_number ASC LIMIT ? OFFSET ?"
        ),
        page_values,
    )?;

    let counters = counters(conn, institution_id, patient_id)?;
    Ok(EventPage {
        events,
        max_logical_timestamp: counters.max_logical_timestamp,
        max_sequence_number: counters.max_sequence_number,
        total: total as u64,
    })
}

fn query_events(conn: &Connection, sql: &str, values: Vec<SqlValue>) -> OdontoResult<Vec<Event>> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let raw = stmt
        .query_map(params_from_iter(values), RawEvent::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.into_iter().map(RawEvent::into_event).collect()
}
