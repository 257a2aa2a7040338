//! HTTP error mapping. Bodies are `{"error": message, "kind": kind}`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use odonto_core::errors::OdontoError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] OdontoError),

    /// The request body or query string could not be decoded.
    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => match err {
                OdontoError::ValidationError(_) => StatusCode::BAD_REQUEST,
                OdontoError::Unauthorized => StatusCode::UNAUTHORIZED,
                OdontoError::NotFound(_) => StatusCode::NOT_FOUND,
                OdontoError::BuildError(_)
                | OdontoError::StorageError(_)
                | OdontoError::SerializationError(_)
                | OdontoError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MalformedRequest(_) => "validation",
            ApiError::Domain(err) => err.kind(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "request failed");
        }
        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odonto_core::errors::{NotFoundError, StorageError, ValidationError};

    #[test]
    fn statuses_follow_error_kind() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (OdontoError::from(ValidationError::EmptyBatch).into(), StatusCode::BAD_REQUEST),
            (OdontoError::Unauthorized.into(), StatusCode::UNAUTHORIZED),
            (
                OdontoError::from(NotFoundError::Event("e".into())).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                OdontoError::from(StorageError::CorruptRow {
                    table: "events",
                    details: "bad payload".into(),
                })
                .into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::MalformedRequest("x".into()), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(err.status(), status, "{err}");
        }
    }
}
