// HTTP request handlers
use crate::domain::error::FleetError;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::ingest::parse_timestamp;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const MAX_REPLAY_INTERVAL_MS: u64 = 10_000;

#[derive(Deserialize)]
pub struct CutoffQuery {
    pub cutoff: Option<String>,
}

#[derive(Deserialize)]
pub struct ReplayQuery {
    pub interval_ms: Option<u64>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, axum::Json(ErrorBody { error: message })).into_response()
}

fn fleet_error_response(e: FleetError) -> Response {
    match e {
        FleetError::InvalidCutoff { .. } => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        FleetError::EmptyInput => {
            tracing::error!("Aggregation on an empty fleet: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn parse_cutoff(query: &CutoffQuery) -> Result<Option<NaiveDateTime>, Response> {
    match query.cutoff.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => parse_timestamp(raw).map(Some).ok_or_else(|| {
            error_response(
                StatusCode::BAD_REQUEST,
                format!("cutoff {:?} is not an ISO-8601 timestamp", raw),
            )
        }),
    }
}

async fn respond<T: Serialize>(data: &T, headers: &HeaderMap) -> Response {
    match json_response(data, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Vehicles, categories and the cutoff range of the loaded fleet
pub async fn fleet_summary(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let summary = state.simulation_service.fleet_summary();
    respond(&summary, &headers).await
}

/// Full dashboard (map, tiles, KPI chart, alert) at the requested cutoff
pub async fn dashboard(
    Query(query): Query<CutoffQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let cutoff = match parse_cutoff(&query) {
        Ok(cutoff) => cutoff,
        Err(response) => return response,
    };

    match state.simulation_service.dashboard_at(cutoff) {
        Ok(dashboard) => respond(&dashboard, &headers).await,
        Err(e) => fleet_error_response(e),
    }
}

/// Raw per-vehicle snapshots and alert level at the requested cutoff
pub async fn snapshots(
    Query(query): Query<CutoffQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let cutoff = match parse_cutoff(&query) {
        Ok(cutoff) => cutoff,
        Err(response) => return response,
    };

    match state.simulation_service.snapshots_at(cutoff) {
        Ok(view) => respond(&view, &headers).await,
        Err(e) => fleet_error_response(e),
    }
}

/// Stream one dashboard frame per timeline step (progressive playback)
pub async fn replay(
    Query(query): Query<ReplayQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let interval_ms = query.interval_ms.unwrap_or(0).min(MAX_REPLAY_INTERVAL_MS);
    let rx = state
        .replay_service
        .stream_replay(Duration::from_millis(interval_ms));
    stream_from_receiver(rx, accepts_brotli(&headers)).await
}
