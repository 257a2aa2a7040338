use super::PayloadError;

/// Fatal errors of a snapshot build. A build that fails produces nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("event {event_id:?} ({event_type}) has a malformed payload: {source}")]
    MalformedPayload {
        event_id: String,
        event_type: String,
        #[source]
        source: PayloadError,
    },
}
