//! Incremental snapshot refresh after an append.
//!
//! Seeds the builder with the stored snapshot and folds in only the new
//! events, plus any events between the stored snapshot and the batch.

use odonto_core::errors::OdontoResult;
use odonto_core::traits::{IEventLog, ISnapshotStore};
use odonto_core::{Event, Snapshot};
use odonto_crdt::build_snapshot;

/// Fold `appended` into the stored snapshot and persist the result.
///
/// Returns `None` for an empty batch.
pub async fn apply_appended<S>(
    store: &S,
    institution_id: i64,
    patient_id: i64,
    appended: &[Event],
) -> OdontoResult<Option<Snapshot>>
where
    S: IEventLog + ISnapshotStore,
{
    let Some(lowest) = appended.iter().map(|e| e.sequence_number).min() else {
        return Ok(None);
    };

    let stored = store.get_snapshot(institution_id, patient_id).await?;
    let mut events = match &stored {
        Some(row) if lowest > row.snapshot.last_event_sequence + 1 => {
            store
                .events_between(institution_id, patient_id, row.snapshot.last_event_sequence, lowest)
                .await?
        }
        Some(_) => Vec::new(),
        None => store.events_between(institution_id, patient_id, 0, lowest).await?,
    };
    let bridged = events.len();
    events.extend_from_slice(appended);

    let seed = stored.as_ref().map(|row| &row.snapshot);
    let snapshot = build_snapshot(&events, seed)?;
    store.upsert_snapshot(institution_id, patient_id, &snapshot).await?;

    tracing::debug!(
        institution_id,
        patient_id,
        seeded = seed.is_some(),
        bridged,
        last_event_sequence = snapshot.last_event_sequence,
        "refreshed stored snapshot"
    );
    Ok(Some(snapshot))
}

/// Best-effort variant: failures are logged and the store is left stale for
/// the next read to rebuild.
pub async fn refresh<S>(store: &S, institution_id: i64, patient_id: i64, appended: &[Event])
where
    S: IEventLog + ISnapshotStore,
{
    if let Err(e) = apply_appended(store, institution_id, patient_id, appended).await {
        tracing::warn!(institution_id, patient_id, error = %e, "incremental snapshot refresh failed");
    }
}
