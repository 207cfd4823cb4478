use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::planning::GraphOrigin;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/info", get(info))
        .route("/live", get(live))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    mastery_store: &'static str,
    mastery_store_available: bool,
    graph_fallback: bool,
}

#[derive(Serialize)]
struct HealthInfoResponse<'a> {
    service: &'static str,
    version: &'a str,
    model_version: &'static str,
    graph_origin: &'a GraphOrigin,
    start_time: String,
    uptime: u64,
}

#[derive(Serialize)]
struct LivenessResponse {
    status: &'static str,
    timestamp: String,
    uptime: u64,
}

/// Degraded when the mastery store backend is unreachable; planning still works.
async fn root(State(state): State<AppState>) -> Response {
    let store = state.mastery_store();
    let available = store.is_available().await;

    let response = HealthResponse {
        status: if available { "ok" } else { "degraded" },
        timestamp: now_iso(),
        mastery_store: store.backend(),
        mastery_store_available: available,
        graph_fallback: state.graph().origin.is_fallback(),
    };

    let status_code = if available {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status_code, Json(response)).into_response()
}

async fn info(State(state): State<AppState>) -> Response {
    let response = HealthInfoResponse {
        service: "edu-minimodels",
        version: state.app_version(),
        model_version: crate::planning::MODEL_VERSION,
        graph_origin: &state.graph().origin,
        start_time: system_time_iso(state.started_at_system()),
        uptime: state.uptime_seconds(),
    };

    Json(response).into_response()
}

async fn live(State(state): State<AppState>) -> Response {
    Json(LivenessResponse {
        status: "healthy",
        timestamp: now_iso(),
        uptime: state.uptime_seconds(),
    })
    .into_response()
}

fn system_time_iso(time: std::time::SystemTime) -> String {
    let datetime: chrono::DateTime<chrono::Utc> = time.into();
    datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
