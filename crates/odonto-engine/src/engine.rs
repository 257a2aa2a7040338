//! OdontogramEngine: the composition root of the write and read paths.

use std::sync::Arc;

use odonto_core::errors::OdontoResult;
use odonto_core::models::{EventFilter, EventPage, SnapshotView};
use odonto_core::traits::{IEventLog, IPatientResolver};
use odonto_core::{Event, EventDraft, OdontoConfig, StaffIdentity};
use odonto_storage::StorageEngine;

use crate::cache::SnapshotCache;
use crate::{incremental, orchestrator, writer};

/// Owns the storage engine and the snapshot cache. Cheap to share behind
/// an `Arc`.
pub struct OdontogramEngine {
    storage: Arc<StorageEngine>,
    cache: SnapshotCache,
}

impl OdontogramEngine {
    pub fn new(storage: Arc<StorageEngine>, cache: SnapshotCache) -> Self {
        Self { storage, cache }
    }

    /// Open storage and build the cache from configuration.
    pub fn from_config(config: &OdontoConfig) -> OdontoResult<Self> {
        let storage = StorageEngine::open(&config.storage)?;
        Ok(Self::new(Arc::new(storage), SnapshotCache::new(&config.cache)))
    }

    pub fn storage(&self) -> &StorageEngine {
        &self.storage
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Resolve a patient uuid within the caller's institution.
    pub async fn resolve_patient(&self, staff: &StaffIdentity, patient_uuid: &str) -> OdontoResult<i64> {
        self.storage
            .resolve_patient(patient_uuid, staff.institution_id)
            .await
    }

    /// Validate and append a batch in one write session.
    ///
    /// After commit the patient's cache entries are dropped and the stored
    /// snapshot is refreshed; neither can fail the append.
    pub async fn append_events(
        &self,
        staff: &StaffIdentity,
        drafts: &[EventDraft],
    ) -> OdontoResult<Vec<Event>> {
        let batch = writer::validate_batch(drafts)?;
        let patient_id = self.resolve_patient(staff, &batch.patient_uuid).await?;

        let session = self.storage.begin().await?;
        let result = writer::append(&session, staff, patient_id, batch);
        let events = session.finish(result)?;

        tracing::info!(
            institution_id = staff.institution_id,
            patient_id,
            staff_id = staff.staff_id,
            count = events.len(),
            "appended events"
        );

        self.cache.invalidate_patient(staff.institution_id, patient_id);
        incremental::refresh(&*self.storage, staff.institution_id, patient_id, &events).await;
        Ok(events)
    }

    /// Current max sequence number of a patient, the authority for
    /// conditional reads.
    pub async fn current_sequence(&self, institution_id: i64, patient_id: i64) -> OdontoResult<i64> {
        self.storage.max_sequence(institution_id, patient_id).await
    }

    pub async fn get_snapshot(
        &self,
        institution_id: i64,
        patient_id: i64,
        visit_id: Option<i64>,
        historical_sequence: Option<i64>,
    ) -> OdontoResult<SnapshotView> {
        orchestrator::read_snapshot(
            &*self.storage,
            &self.cache,
            institution_id,
            patient_id,
            visit_id,
            historical_sequence,
        )
        .await
    }

    pub async fn list_events(
        &self,
        institution_id: i64,
        patient_id: i64,
        filter: &EventFilter,
    ) -> OdontoResult<EventPage> {
        self.storage.list_events(institution_id, patient_id, filter).await
    }
}
