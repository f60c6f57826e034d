//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/sessions/:session_id/timer",
            post(create_timer_handler)
                .get(query_timer_handler)
                .delete(cancel_timer_handler),
        )
        .route("/sessions/:session_id/timer/pause", post(pause_timer_handler))
        .route("/sessions/:session_id/timer/resume", post(resume_timer_handler))
        .route("/sessions/:session_id/timer/:interval", post(start_interval_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
