use super::PayloadError;

/// Client-caused errors. Reported to the caller, never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("event batch is empty")]
    EmptyBatch,

    #[error("batch size {size} exceeds the maximum of {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("invalid FDI tooth number {0:?}")]
    InvalidToothId(String),

    #[error("unknown event type {0:?}")]
    UnknownEventType(String),

    #[error("invalid payload for {event_type}: {source}")]
    InvalidPayload {
        event_type: String,
        #[source]
        source: PayloadError,
    },

    #[error("all events in a batch must reference one patient: expected {expected:?}, found {found:?}")]
    PatientMismatch { expected: String, found: String },

    #[error("invalid patient uuid {0:?}")]
    InvalidPatientUuid(String),

    #[error("invalid pagination: {0}")]
    InvalidPagination(String),
}
