//! Event log writer: draft validation and batch append.
//!
//! Validation runs before any storage access. Appending assigns two
//! contiguous counter runs above the patient's current maxima, read once
//! inside the caller's write session, and inserts the whole batch there.

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use odonto_core::constants::MAX_BATCH_SIZE;
use odonto_core::errors::{OdontoResult, ValidationError};
use odonto_core::models::{validate_fdi_tooth, EventPayload};
use odonto_core::{Event, EventDraft, EventType, StaffIdentity};
use odonto_storage::WriteSession;

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    pub event_id: String,
    pub visit_id: Option<i64>,
    pub journey_point_id: Option<i64>,
    pub event_type: EventType,
    pub tooth_id: String,
    pub event_data: Value,
    pub unix_timestamp: i64,
}

/// A validated batch for a single patient.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBatch {
    pub patient_uuid: String,
    pub drafts: Vec<ValidatedDraft>,
}

/// Validate every draft of a batch.
pub fn validate_batch(drafts: &[EventDraft]) -> Result<ValidatedBatch, ValidationError> {
    if drafts.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    if drafts.len() > MAX_BATCH_SIZE {
        return Err(ValidationError::BatchTooLarge {
            size: drafts.len(),
            max: MAX_BATCH_SIZE,
        });
    }

    let mut patient_uuid: Option<&str> = None;
    let mut validated = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let uuid = draft
            .patient_uuid
            .as_deref()
            .ok_or(ValidationError::MissingField("patient_uuid"))?;
        match patient_uuid {
            None => {
                Uuid::parse_str(uuid)
                    .map_err(|_| ValidationError::InvalidPatientUuid(uuid.to_string()))?;
                patient_uuid = Some(uuid);
            }
            Some(expected) if expected != uuid => {
                return Err(ValidationError::PatientMismatch {
                    expected: expected.to_string(),
                    found: uuid.to_string(),
                });
            }
            Some(_) => {}
        }
        validated.push(validate_draft(draft)?);
    }

    Ok(ValidatedBatch {
        patient_uuid: patient_uuid.unwrap_or_default().to_string(),
        drafts: validated,
    })
}

fn validate_draft(draft: &EventDraft) -> Result<ValidatedDraft, ValidationError> {
    let event_type: EventType = draft
        .event_type
        .as_deref()
        .ok_or(ValidationError::MissingField("event_type"))?
        .parse()?;
    let tooth_id = draft
        .tooth_id
        .as_deref()
        .ok_or(ValidationError::MissingField("tooth_id"))?;
    validate_fdi_tooth(tooth_id)?;
    EventPayload::parse(event_type, &draft.event_data).map_err(|source| {
        ValidationError::InvalidPayload {
            event_type: event_type.to_string(),
            source,
        }
    })?;

    let event_id = match draft.event_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    };

    Ok(ValidatedDraft {
        event_id,
        visit_id: draft.visit_id,
        journey_point_id: draft.journey_point_id,
        event_type,
        tooth_id: tooth_id.to_string(),
        event_data: draft.event_data.clone(),
        unix_timestamp: draft.unix_timestamp.unwrap_or_else(|| Utc::now().timestamp()),
    })
}

/// Stamp and insert a validated batch inside `session`.
///
/// Does not commit: the caller finishes the session with the result.
pub fn append(
    session: &WriteSession<'_>,
    staff: &StaffIdentity,
    patient_id: i64,
    batch: ValidatedBatch,
) -> OdontoResult<Vec<Event>> {
    let counters = session.counters(staff.institution_id, patient_id)?;
    let create_time = Utc::now();

    let events: Vec<Event> = batch
        .drafts
        .into_iter()
        .zip(1i64..)
        .map(|(draft, offset)| Event {
            event_id: draft.event_id,
            institution_id: staff.institution_id,
            patient_id,
            visit_id: draft.visit_id,
            journey_point_id: draft.journey_point_id,
            event_type: draft.event_type,
            tooth_id: draft.tooth_id,
            sequence_number: counters.max_sequence_number + offset,
            logical_timestamp: counters.max_logical_timestamp + offset,
            event_data: draft.event_data,
            created_by_staff_id: staff.staff_id,
            created_by: staff.display_name.clone(),
            unix_timestamp: draft.unix_timestamp,
            create_time,
        })
        .collect();

    session.insert_events(&events)?;
    tracing::debug!(
        patient_id,
        first_sequence = counters.max_sequence_number + 1,
        count = events.len(),
        "stamped event batch"
    );
    Ok(events)
}
