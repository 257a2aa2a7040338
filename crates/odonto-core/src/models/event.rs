//! Events: the immutable, append-only unit of the log.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// The seven tooth-level edit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ToothCodeInsert,
    ToothCodeRemove,
    ToothGeneralNoteUpdate,
    ToothSurfaceCodeSet,
    ToothSurfaceCodeRemove,
    ToothSurfaceNoteUpdate,
    ToothReset,
}

impl EventType {
    pub const ALL: [EventType; 7] = [
        EventType::ToothCodeInsert,
        EventType::ToothCodeRemove,
        EventType::ToothGeneralNoteUpdate,
        EventType::ToothSurfaceCodeSet,
        EventType::ToothSurfaceCodeRemove,
        EventType::ToothSurfaceNoteUpdate,
        EventType::ToothReset,
    ];

    /// Wire name, as stored in the `event_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::ToothCodeInsert => "tooth_code_insert",
            EventType::ToothCodeRemove => "tooth_code_remove",
            EventType::ToothGeneralNoteUpdate => "tooth_general_note_update",
            EventType::ToothSurfaceCodeSet => "tooth_surface_code_set",
            EventType::ToothSurfaceCodeRemove => "tooth_surface_code_remove",
            EventType::ToothSurfaceNoteUpdate => "tooth_surface_note_update",
            EventType::ToothReset => "tooth_reset",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownEventType(s.to_string()))
    }
}

/// A persisted event with its ordering metadata assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Deduplication key. Legacy rows may carry an empty id.
    pub event_id: String,
    pub institution_id: i64,
    pub patient_id: i64,
    pub visit_id: Option<i64>,
    pub journey_point_id: Option<i64>,
    pub event_type: EventType,
    /// FDI two-digit tooth code.
    pub tooth_id: String,
    /// Per-patient monotonic counter for pagination and gap detection.
    /// Irrelevant to merge order.
    pub sequence_number: i64,
    /// Per-patient monotonic merge clock.
    pub logical_timestamp: i64,
    pub event_data: serde_json::Value,
    pub created_by_staff_id: i64,
    pub created_by: String,
    /// Client wall clock in seconds. Informational only.
    pub unix_timestamp: i64,
    pub create_time: DateTime<Utc>,
}

/// Client-submitted event, before ordering metadata is assigned.
///
/// Required fields are optional here so that a missing field surfaces as a
/// validation error naming the field rather than a generic decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub patient_uuid: Option<String>,
    #[serde(default)]
    pub visit_id: Option<i64>,
    #[serde(default)]
    pub journey_point_id: Option<i64>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub tooth_id: Option<String>,
    #[serde(default)]
    pub event_data: serde_json::Value,
    #[serde(default)]
    pub unix_timestamp: Option<i64>,
}
