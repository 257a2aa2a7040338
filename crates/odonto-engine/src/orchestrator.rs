//! Snapshot reads: cache, then store freshness check, then full rebuild.

use std::sync::Arc;

use odonto_core::errors::OdontoResult;
use odonto_core::models::{SnapshotSource, SnapshotView};
use odonto_core::traits::{IEventLog, ISnapshotStore};
use odonto_core::Snapshot;
use odonto_crdt::build_snapshot;

use crate::cache::{CacheKey, SnapshotCache};

/// Read a patient's snapshot.
///
/// With `historical_sequence` the snapshot is rebuilt from events up to that
/// sequence number and neither cached nor stored.
pub async fn read_snapshot<S>(
    store: &S,
    cache: &SnapshotCache,
    institution_id: i64,
    patient_id: i64,
    visit_id: Option<i64>,
    historical_sequence: Option<i64>,
) -> OdontoResult<SnapshotView>
where
    S: IEventLog + ISnapshotStore,
{
    if let Some(bound) = historical_sequence {
        let events = store.events_up_to(institution_id, patient_id, bound).await?;
        let snapshot = build_snapshot(&events, None)?;
        return Ok(SnapshotView {
            snapshot: Arc::new(snapshot),
            max_sequence_number: bound,
            source: SnapshotSource::Historical,
        });
    }

    let key = CacheKey::new(institution_id, patient_id, visit_id);
    if let Some(snapshot) = cache.get(&key) {
        return Ok(SnapshotView {
            max_sequence_number: snapshot.last_event_sequence,
            snapshot,
            source: SnapshotSource::Cache,
        });
    }

    let (max_sequence, stored) = tokio::try_join!(
        store.max_sequence(institution_id, patient_id),
        store.get_snapshot(institution_id, patient_id),
    )?;

    match stored {
        Some(row) if row.snapshot.last_event_sequence == max_sequence => {
            let snapshot = Arc::new(row.snapshot);
            cache.insert(key, Arc::clone(&snapshot));
            Ok(SnapshotView {
                snapshot,
                max_sequence_number: max_sequence,
                source: SnapshotSource::Store,
            })
        }
        None if max_sequence == 0 => Ok(SnapshotView {
            snapshot: Arc::new(Snapshot::empty()),
            max_sequence_number: 0,
            source: SnapshotSource::Empty,
        }),
        stale => {
            tracing::debug!(
                institution_id,
                patient_id,
                max_sequence,
                stored_sequence = stale.as_ref().map(|row| row.snapshot.last_event_sequence),
                "rebuilding snapshot"
            );
            let events = store.events_up_to(institution_id, patient_id, max_sequence).await?;
            let mut snapshot = build_snapshot(&events, None)?;
            snapshot.last_event_sequence = max_sequence;

            if let Err(e) = store.upsert_snapshot(institution_id, patient_id, &snapshot).await {
                tracing::warn!(institution_id, patient_id, error = %e, "failed to persist rebuilt snapshot");
            }
            let snapshot = Arc::new(snapshot);
            cache.insert(key, Arc::clone(&snapshot));
            Ok(SnapshotView {
                snapshot,
                max_sequence_number: max_sequence,
                source: SnapshotSource::Rebuilt,
            })
        }
    }
}
