use crate::errors::OdontoResult;
use crate::models::{Snapshot, StoredSnapshot};

/// Durable, disposable projection of the current snapshot per patient.
#[allow(async_fn_in_trait)]
pub trait ISnapshotStore: Send + Sync {
    async fn get_snapshot(
        &self,
        institution_id: i64,
        patient_id: i64,
    ) -> OdontoResult<Option<StoredSnapshot>>;

    /// Insert if absent, else replace, keyed by `(patient, institution)`.
    async fn upsert_snapshot(
        &self,
        institution_id: i64,
        patient_id: i64,
        snapshot: &Snapshot,
    ) -> OdontoResult<()>;
}
