//! Materialized odontogram state.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tooth::Surface;

/// One surface of one tooth, decorated with display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceState {
    pub surface: Surface,
    pub code: String,
    pub notes: String,
    /// Timestamp of the latest write to either sub-field.
    pub logical_timestamp: i64,
    /// Staff member behind the latest write to either sub-field.
    pub created_by_staff_id: i64,
    pub display_name: String,
    pub color: String,
    pub pattern: String,
}

/// Materialized state of one tooth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToothState {
    /// Active whole-tooth codes, sorted.
    pub whole_tooth_code: Vec<String>,
    pub general_notes: String,
    /// Surfaces sorted by surface code.
    pub surfaces: Vec<SurfaceState>,
}

/// Current state of a patient's odontogram, reproducible from the event log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub teeth: BTreeMap<String, ToothState>,
    /// Staleness marker compared against the log's max sequence number.
    pub last_event_sequence: i64,
    pub max_logical_timestamp: i64,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// The snapshot of a patient with no recorded events.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn tooth(&self, tooth_id: &str) -> Option<&ToothState> {
        self.teeth.get(tooth_id)
    }
}

/// A snapshot row in the durable store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSnapshot {
    pub institution_id: i64,
    pub patient_id: i64,
    pub snapshot: Snapshot,
    pub updated_at: DateTime<Utc>,
}

/// Where a read's snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Cache,
    Store,
    Rebuilt,
    Empty,
    Historical,
}

/// Result of a snapshot read.
#[derive(Debug, Clone)]
pub struct SnapshotView {
    pub snapshot: Arc<Snapshot>,
    /// Authority value for conditional reads: the patient's max sequence
    /// number at read time (or the requested bound for historical reads).
    pub max_sequence_number: i64,
    pub source: SnapshotSource,
}
