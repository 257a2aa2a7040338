/// Lookups that resolved to nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    #[error("patient {uuid} in institution {institution_id}")]
    Patient { uuid: String, institution_id: i64 },

    #[error("event {0}")]
    Event(String),
}
