//! Route table, bearer-token guard and handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, Request, State};
use axum::http::header::{AUTHORIZATION, ETAG, IF_NONE_MATCH};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::{from_fn_with_state, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use odonto_core::errors::OdontoError;
use odonto_core::models::EventPage;
use odonto_core::traits::IStaffAuthenticator;
use odonto_core::StaffIdentity;

use crate::api::{AppendRequest, AppendResponse, LogsQuery, OdontogramResponse, SnapshotQuery};
use crate::auth::bearer_token;
use crate::errors::ApiError;
use crate::etag::{format_etag, if_none_match_matches};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/odontogram/logs", get(list_logs).post(append_logs))
        .route("/odontogram", get(get_odontogram))
        .route_layer(from_fn_with_state(state.clone(), auth_guard));

    Router::new()
        .route("/health", get(health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolve the caller and hand it to handlers as an extension.
async fn auth_guard(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token);
    let staff = state.auth.current_staff(bearer)?;
    req.extensions_mut().insert(staff);
    Ok(next.run(req).await)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn append_logs(
    State(state): State<AppState>,
    Extension(staff): Extension<StaffIdentity>,
    body: Result<Json<AppendRequest>, JsonRejection>,
) -> Result<Json<AppendResponse>, ApiError> {
    let Json(request) = body?;
    let events = state.engine.append_events(&staff, &request.events).await?;
    Ok(Json(AppendResponse {
        success: true,
        count: events.len(),
        events,
    }))
}

async fn list_logs(
    State(state): State<AppState>,
    Extension(staff): Extension<StaffIdentity>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Result<Json<EventPage>, ApiError> {
    let Query(query) = query?;
    let (patient_uuid, filter) = query
        .into_filter(&state.server)
        .map_err(OdontoError::from)?;
    let patient_id = state.engine.resolve_patient(&staff, &patient_uuid).await?;
    let page = state
        .engine
        .list_events(staff.institution_id, patient_id, &filter)
        .await?;
    Ok(Json(page))
}

async fn get_odontogram(
    State(state): State<AppState>,
    Extension(staff): Extension<StaffIdentity>,
    headers: HeaderMap,
    query: Result<Query<SnapshotQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let patient_uuid = query.patient_uuid().map_err(OdontoError::from)?;
    let historical = query.historical_sequence().map_err(OdontoError::from)?;
    let patient_id = state.engine.resolve_patient(&staff, patient_uuid).await?;

    // Conditional reads only apply to the live snapshot.
    if historical.is_none() {
        if let Some(if_none_match) = headers.get(IF_NONE_MATCH).and_then(|v| v.to_str().ok()) {
            let current = state
                .engine
                .current_sequence(staff.institution_id, patient_id)
                .await?;
            if if_none_match_matches(if_none_match, current) {
                return Ok(not_modified(current));
            }
        }
    }

    let view = state
        .engine
        .get_snapshot(staff.institution_id, patient_id, query.visit_id, historical)
        .await?;
    tracing::debug!(
        patient_id,
        source = ?view.source,
        max_sequence = view.max_sequence_number,
        "snapshot read"
    );

    let snapshot = &view.snapshot;
    let body = OdontogramResponse {
        patient_uuid,
        teeth: &snapshot.teeth,
        last_event_sequence: snapshot.last_event_sequence,
        max_logical_timestamp: snapshot.max_logical_timestamp,
        max_sequence_number: view.max_sequence_number,
        last_updated: snapshot.last_updated,
    };
    let mut response = Json(body).into_response();
    if let Some(tag) = etag_header(view.max_sequence_number) {
        response.headers_mut().insert(ETAG, tag);
    }
    Ok(response)
}

fn not_modified(current: i64) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    if let Some(tag) = etag_header(current) {
        response.headers_mut().insert(ETAG, tag);
    }
    response
}

fn etag_header(max_sequence: i64) -> Option<HeaderValue> {
    HeaderValue::from_str(&format_etag(max_sequence)).ok()
}
