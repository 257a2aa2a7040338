//! Test fixtures for the odontogram workspace: event and draft builders,
//! staff identities, and golden scenario files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use odonto_core::{Event, EventDraft, EventType, StaffIdentity, ToothState};

pub const INSTITUTION_ID: i64 = 1;
pub const PATIENT_ID: i64 = 1;
pub const PATIENT_UUID: &str = "5f0c8c2e-2b9a-4c47-9a53-6a1f0d3e2b11";

/// Root directory of the golden scenario files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// List every scenario file.
pub fn list_scenarios() -> Vec<PathBuf> {
    let dir = fixtures_root();
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    paths.sort();
    paths
}

/// One event line of a golden scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioEvent {
    pub sequence: i64,
    pub timestamp: i64,
    pub staff: i64,
    pub tooth: String,
    pub event_type: EventType,
    #[serde(default)]
    pub data: Value,
}

/// A golden scenario: an event history and the teeth it must produce.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub events: Vec<ScenarioEvent>,
    pub expected: BTreeMap<String, ToothState>,
}

impl Scenario {
    pub fn load(relative_path: &str) -> Self {
        load_fixture(relative_path)
    }

    pub fn to_events(&self) -> Vec<Event> {
        self.events
            .iter()
            .map(|e| {
                event(
                    e.sequence,
                    e.timestamp,
                    e.staff,
                    &e.tooth,
                    e.event_type,
                    e.data.clone(),
                )
            })
            .collect()
    }
}

/// Fixed wall clock used for `create_time`, offset by `seconds`.
pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// A persisted event for the default patient. The event id is derived from
/// the sequence number.
pub fn event(
    sequence: i64,
    timestamp: i64,
    staff: i64,
    tooth: &str,
    event_type: EventType,
    data: Value,
) -> Event {
    Event {
        event_id: format!("evt-{sequence}"),
        institution_id: INSTITUTION_ID,
        patient_id: PATIENT_ID,
        visit_id: None,
        journey_point_id: None,
        event_type,
        tooth_id: tooth.to_string(),
        sequence_number: sequence,
        logical_timestamp: timestamp,
        event_data: data,
        created_by_staff_id: staff,
        created_by: format!("staff{staff}@clinic.test"),
        unix_timestamp: 1_700_000_000 + timestamp,
        create_time: at(sequence),
    }
}

/// A client draft for the default patient. The event id is left for the
/// writer to generate.
pub fn draft(tooth: &str, event_type: EventType, data: Value) -> EventDraft {
    EventDraft {
        event_id: None,
        patient_uuid: Some(PATIENT_UUID.to_string()),
        visit_id: None,
        journey_point_id: None,
        event_type: Some(event_type.as_str().to_string()),
        tooth_id: Some(tooth.to_string()),
        event_data: data,
        unix_timestamp: Some(1_700_000_000),
    }
}

pub fn staff(staff_id: i64) -> StaffIdentity {
    StaffIdentity {
        staff_id,
        institution_id: INSTITUTION_ID,
        email: format!("staff{staff_id}@clinic.test"),
        display_name: format!("Staff {staff_id}"),
    }
}

// Payload shorthands.

pub fn codes(codes: &[&str]) -> Value {
    json!({ "whole_tooth_code": codes })
}

pub fn general_note(notes: &str) -> Value {
    json!({ "general_notes": notes })
}

pub fn surface_code(surface: &str, code: &str) -> Value {
    json!({ "surface": surface, "code": code })
}

pub fn surface_only(surface: &str) -> Value {
    json!({ "surface": surface })
}

pub fn surface_note(surface: &str, notes: &str) -> Value {
    json!({ "surface": surface, "notes": notes })
}
