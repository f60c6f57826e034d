//! HTTP endpoint handlers
//!
//! Each timer handler runs exactly one state machine operation and reports
//! the timer as it stands afterwards. Requests for the same session are not
//! serialized here, so two overlapping writes can lose one of the updates.

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    error::TimerError,
    state::{AppState, SessionTimer},
    timer::Interval,
};
use super::responses::{CreateTimerRequest, ErrorResponse, HealthResponse, StatusResponse, TimerResponse};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Map a timer failure onto a response without taking the request cycle down
fn error_response(session_id: &str, action: &str, e: TimerError) -> (StatusCode, Json<ErrorResponse>) {
    if e.is_validation() {
        warn!("Rejected {} for session {}: {}", action, session_id, e);
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string())))
    } else {
        error!("Failed to {} timer for session {}: {}", action, session_id, e);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::apology()))
    }
}

fn respond(session_id: &str, action: &str, applied: bool, timer: &SessionTimer) -> ApiResult<TimerResponse> {
    let snapshot = timer
        .snapshot()
        .map_err(|e| error_response(session_id, action, e))?;
    Ok(Json(TimerResponse::new(session_id, action, applied, snapshot)))
}

fn start(state: &AppState, session_id: &str, action: &str, seconds: u64) -> ApiResult<TimerResponse> {
    let mut timer = state.timer(session_id);
    timer
        .create(seconds)
        .map_err(|e| error_response(session_id, action, e))?;
    info!("Session {} started a {}s timer ({})", session_id, seconds, action);
    respond(session_id, action, true, &timer)
}

/// Handle POST /sessions/:id/timer - Start a timer of arbitrary length
pub async fn create_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    request: Result<Json<CreateTimerRequest>, JsonRejection>,
) -> ApiResult<TimerResponse> {
    let Json(request) = request.map_err(|rejection| {
        warn!("Rejected create for session {}: {}", session_id, rejection.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!(
                "Expected a JSON body like {{\"duration_seconds\": 1500}}: {}",
                rejection.body_text()
            ))),
        )
    })?;

    start(&state, &session_id, "create", request.duration_seconds)
}

/// Handle POST /sessions/:id/timer/:interval - Start a pomodoro or break
pub async fn start_interval_handler(
    State(state): State<Arc<AppState>>,
    Path((session_id, interval)): Path<(String, String)>,
) -> ApiResult<TimerResponse> {
    let interval: Interval = interval.parse().map_err(|e: String| {
        warn!("Session {} asked for {}", session_id, e);
        (StatusCode::NOT_FOUND, Json(ErrorResponse::new(e)))
    })?;

    start(&state, &session_id, interval.as_str(), state.interval_seconds(interval))
}

/// Handle GET /sessions/:id/timer - Report remaining time
pub async fn query_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<TimerResponse> {
    let timer = state.timer(&session_id);
    let snapshot = timer
        .snapshot()
        .map_err(|e| error_response(&session_id, "query", e))?;
    Ok(Json(TimerResponse::new(&session_id, "query", snapshot.is_some(), snapshot)))
}

/// Handle POST /sessions/:id/timer/pause - Pause a running timer
pub async fn pause_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<TimerResponse> {
    let mut timer = state.timer(&session_id);
    let applied = timer
        .pause()
        .map_err(|e| error_response(&session_id, "pause", e))?;
    if applied {
        info!("Session {} paused its timer", session_id);
    }
    respond(&session_id, "pause", applied, &timer)
}

/// Handle POST /sessions/:id/timer/resume - Resume a paused timer
pub async fn resume_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<TimerResponse> {
    let mut timer = state.timer(&session_id);
    let applied = timer
        .resume()
        .map_err(|e| error_response(&session_id, "resume", e))?;
    if applied {
        info!("Session {} resumed its timer", session_id);
    }
    respond(&session_id, "resume", applied, &timer)
}

/// Handle DELETE /sessions/:id/timer - Cancel the timer
pub async fn cancel_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<TimerResponse> {
    let mut timer = state.timer(&session_id);
    timer
        .cancel()
        .map_err(|e| error_response(&session_id, "cancel", e))?;
    Ok(Json(TimerResponse::new(&session_id, "cancel", true, None)))
}

/// Handle GET /status - Return server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let sessions = match state.sessions.len() {
        Ok(n) => n,
        Err(e) => {
            error!("Failed to count sessions: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(Json(StatusResponse {
        sessions,
        timer_key: state.timer_key.clone(),
        uptime: state.get_uptime(),
        port: state.config.port,
        host: state.config.host.clone(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
