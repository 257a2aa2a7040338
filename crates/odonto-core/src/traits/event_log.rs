use crate::errors::OdontoResult;
use crate::models::{Event, EventFilter, EventPage, PatientCounters};

/// Read side of the append-only event log.
///
/// Writes go through an explicit write session owned by the storage crate,
/// so this trait only covers reads.
#[allow(async_fn_in_trait)]
pub trait IEventLog: Send + Sync {
    /// Current per-patient maxima of both counters (0 when no events exist).
    async fn counters(&self, institution_id: i64, patient_id: i64) -> OdontoResult<PatientCounters>;

    /// Current max sequence number of the patient (0 when no events exist).
    async fn max_sequence(&self, institution_id: i64, patient_id: i64) -> OdontoResult<i64>;

    /// All events with `sequence_number <= max_sequence`, in sequence order.
    async fn events_up_to(
        &self,
        institution_id: i64,
        patient_id: i64,
        max_sequence: i64,
    ) -> OdontoResult<Vec<Event>>;

    /// Events with `after < sequence_number < before`, in sequence order.
    async fn events_between(
        &self,
        institution_id: i64,
        patient_id: i64,
        after: i64,
        before: i64,
    ) -> OdontoResult<Vec<Event>>;

    /// Filtered, paginated listing.
    async fn list_events(
        &self,
        institution_id: i64,
        patient_id: i64,
        filter: &EventFilter,
    ) -> OdontoResult<EventPage>;
}
