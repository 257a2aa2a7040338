//! Folds an event history, optionally on top of a seed snapshot, into a
//! materialized [`Snapshot`].
//!
//! A builder is a throwaway value: construct one per call, feed it events,
//! and consume it with [`SnapshotBuilder::build`].

mod order;

use std::collections::BTreeMap;

use odonto_core::errors::BuildError;
use odonto_core::models::EventPayload;
use odonto_core::{Event, Snapshot};

use crate::primitives::Stamp;
use crate::tooth::ToothCRDT;

pub use order::merge_order;

/// Single-use snapshot builder.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    teeth: BTreeMap<String, ToothCRDT>,
    seed_counters: (i64, i64),
    last_updated: Option<chrono::DateTime<chrono::Utc>>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from `seed`. Seeded values carry zero stamps, so every real
    /// event overrides them.
    pub fn with_seed(seed: &Snapshot) -> Self {
        let teeth = seed
            .teeth
            .iter()
            .map(|(id, state)| (id.clone(), ToothCRDT::seeded(state)))
            .collect();
        Self {
            teeth,
            seed_counters: (seed.last_event_sequence, seed.max_logical_timestamp),
            last_updated: seed.last_updated,
        }
    }

    /// Apply `events` in merge order and materialize.
    ///
    /// Any malformed payload aborts the build.
    pub fn build(mut self, events: &[Event]) -> Result<Snapshot, BuildError> {
        let ordered = merge_order(events);

        for event in &ordered {
            let payload = EventPayload::parse(event.event_type, &event.event_data).map_err(
                |source| BuildError::MalformedPayload {
                    event_id: event.event_id.clone(),
                    event_type: event.event_type.to_string(),
                    source,
                },
            )?;
            self.teeth
                .entry(event.tooth_id.clone())
                .or_default()
                .apply(&payload, Stamp::of(event));
            self.last_updated = self.last_updated.max(Some(event.create_time));
        }

        let (last_event_sequence, max_logical_timestamp) = match ordered.last() {
            Some(tail) => (tail.sequence_number, tail.logical_timestamp),
            None => self.seed_counters,
        };

        tracing::debug!(
            events = ordered.len(),
            teeth = self.teeth.len(),
            last_event_sequence,
            "built snapshot"
        );

        Ok(Snapshot {
            teeth: self
                .teeth
                .iter()
                .map(|(id, tooth)| (id.clone(), tooth.materialize()))
                .collect(),
            last_event_sequence,
            max_logical_timestamp,
            last_updated: self.last_updated,
        })
    }
}

/// Build a snapshot from `events`, optionally on top of `seed`.
pub fn build_snapshot(events: &[Event], seed: Option<&Snapshot>) -> Result<Snapshot, BuildError> {
    match seed {
        Some(seed) => SnapshotBuilder::with_seed(seed),
        None => SnapshotBuilder::new(),
    }
    .build(events)
}
