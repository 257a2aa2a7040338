/// Problems found while decoding an `event_data` payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` has the wrong type: {reason}")]
    WrongType { field: &'static str, reason: String },

    #[error("invalid surface {0:?}")]
    InvalidSurface(String),

    #[error("invalid code {0:?}")]
    InvalidCode(String),
}
