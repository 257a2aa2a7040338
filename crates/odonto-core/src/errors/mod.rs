//! Error taxonomy for the odontogram core.
//!
//! Every fallible operation returns [`OdontoResult`]. Domain-specific errors
//! live in their own modules and are folded into [`OdontoError`] via `From`.

mod build_error;
mod config_error;
mod not_found_error;
mod payload_error;
mod storage_error;
mod validation_error;

pub use build_error::BuildError;
pub use config_error::ConfigError;
pub use not_found_error::NotFoundError;
pub use payload_error::PayloadError;
pub use storage_error::StorageError;
pub use validation_error::ValidationError;

/// Result alias used across the workspace.
pub type OdontoResult<T> = Result<T, OdontoError>;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum OdontoError {
    #[error("validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("unauthorized: no resolvable caller identity")]
    Unauthorized,

    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("snapshot build failed: {0}")]
    BuildError(#[from] BuildError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),
}

impl OdontoError {
    /// Stable machine-readable category, used in HTTP error bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OdontoError::ValidationError(_) => "validation",
            OdontoError::Unauthorized => "unauthorized",
            OdontoError::NotFound(_) => "not_found",
            OdontoError::BuildError(_) => "build",
            OdontoError::StorageError(_) => "storage",
            OdontoError::SerializationError(_) => "serialization",
            OdontoError::ConfigError(_) => "config",
        }
    }

    /// Whether the error was caused by the client (not worth retrying).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            OdontoError::ValidationError(_) | OdontoError::Unauthorized | OdontoError::NotFound(_)
        )
    }
}
