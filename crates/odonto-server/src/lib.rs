//! # odonto-server
//!
//! axum routes over [`OdontogramEngine`](odonto_engine::OdontogramEngine):
//!
//! - `POST /odontogram/logs` append a batch of events
//! - `GET /odontogram/logs` list a patient's events
//! - `GET /odontogram` read the current (or a historical) snapshot, with ETags
//! - `GET /health` liveness
//!
//! Every route but `/health` requires `Authorization: Bearer <token>`.

pub mod api;
pub mod auth;
pub mod errors;
pub mod etag;
pub mod router;
pub mod state;
pub mod telemetry;

pub use auth::TokenDirectory;
pub use errors::ApiError;
pub use router::build_router;
pub use state::AppState;
