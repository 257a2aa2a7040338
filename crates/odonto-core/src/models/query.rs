//! Event log query filter and page.

use serde::{Deserialize, Serialize};

use super::event::{Event, EventType};

/// Filter for listing a patient's events. All set fields must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub tooth_id: Option<String>,
    pub event_type: Option<EventType>,
    pub visit_id: Option<i64>,
    /// Inclusive lower bound on `sequence_number`.
    pub from_sequence: Option<i64>,
    /// Inclusive upper bound on `sequence_number`.
    pub to_sequence: Option<i64>,
    pub event_id: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            tooth_id: None,
            event_type: None,
            visit_id: None,
            from_sequence: None,
            to_sequence: None,
            event_id: None,
            limit: crate::config::defaults::DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

/// Per-patient counter maxima. Both are 0 for a patient with no events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientCounters {
    pub max_sequence_number: i64,
    pub max_logical_timestamp: i64,
}

/// One page of events plus the patient's current counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPage {
    pub events: Vec<Event>,
    pub max_logical_timestamp: i64,
    pub max_sequence_number: i64,
    /// Number of events matching the filter, ignoring limit and offset.
    pub total: u64,
}
