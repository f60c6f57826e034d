//! End-to-end tests for the timer HTTP API

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use pomodoro_session::{
    api::create_router,
    config::Config,
    state::AppState,
    timer::ManualClock,
};

fn app() -> (Router, Arc<AppState>, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
    let state = Arc::new(AppState::new(Config::default(), Arc::new(clock.clone())));
    (create_router(Arc::clone(&state)), state, clock)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn test_pomodoro_lifecycle() {
    let (app, _, clock) = app();

    let (status, body) = call(&app, Method::POST, "/sessions/s1/timer", Some(json!({"duration_seconds": 1500}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "RUNNING");
    assert_eq!(body["remaining_seconds"], 1500);
    assert_eq!(body["display"], "25:00");

    clock.advance(5);
    let (_, body) = call(&app, Method::GET, "/sessions/s1/timer", None).await;
    assert_eq!(body["remaining_seconds"], 1495);

    clock.advance(5);
    let (_, body) = call(&app, Method::POST, "/sessions/s1/timer/pause", None).await;
    assert_eq!(body["applied"], true);
    assert_eq!(body["status"], "PAUSED");
    assert_eq!(body["remaining_seconds"], 1490);

    clock.advance(10);
    let (_, body) = call(&app, Method::POST, "/sessions/s1/timer/resume", None).await;
    assert_eq!(body["applied"], true);
    assert_eq!(body["status"], "RUNNING");

    clock.advance(30);
    let (_, body) = call(&app, Method::GET, "/sessions/s1/timer", None).await;
    assert_eq!(body["remaining_seconds"], 1460);
    assert_eq!(body["display"], "24:20");

    let (status, body) = call(&app, Method::DELETE, "/sessions/s1/timer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display"], "--:--");

    let (_, body) = call(&app, Method::GET, "/sessions/s1/timer", None).await;
    assert_eq!(body["applied"], false);
    assert!(body["remaining_seconds"].is_null());
    assert!(body["status"].is_null());
}

#[tokio::test]
async fn test_interval_presets() {
    let (app, _, _) = app();

    let (_, body) = call(&app, Method::POST, "/sessions/s1/timer/pomodoro", None).await;
    assert_eq!(body["remaining_seconds"], 1500);
    assert_eq!(body["action"], "pomodoro");

    let (_, body) = call(&app, Method::POST, "/sessions/s1/timer/short-break", None).await;
    assert_eq!(body["remaining_seconds"], 300);

    let (_, body) = call(&app, Method::POST, "/sessions/s1/timer/long-break", None).await;
    assert_eq!(body["remaining_seconds"], 900);

    let (status, _) = call(&app, Method::POST, "/sessions/s1/timer/nap", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_state_is_not_an_error() {
    let (app, _, _) = app();

    let (status, body) = call(&app, Method::POST, "/sessions/s1/timer/pause", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applied"], false);

    let (_, body) = call(&app, Method::POST, "/sessions/s1/timer/resume", None).await;
    assert_eq!(body["applied"], false);

    call(&app, Method::POST, "/sessions/s1/timer/short-break", None).await;
    let (_, body) = call(&app, Method::POST, "/sessions/s1/timer/resume", None).await;
    assert_eq!(body["applied"], false);
    assert_eq!(body["status"], "RUNNING");

    let (status, _) = call(&app, Method::DELETE, "/sessions/s1/timer", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, Method::DELETE, "/sessions/s1/timer", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_zero_duration_is_rejected() {
    let (app, _, _) = app();

    let (status, body) = call(&app, Method::POST, "/sessions/s1/timer", Some(json!({"duration_seconds": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (_, body) = call(&app, Method::GET, "/sessions/s1/timer", None).await;
    assert!(body["remaining_seconds"].is_null());
}

#[tokio::test]
async fn test_malformed_duration_is_a_bad_request() {
    let (app, _, _) = app();

    for body in [
        json!({"duration_seconds": -5}),
        json!({"duration_seconds": "ten"}),
        json!({"duration_seconds": 1.5}),
        json!({}),
    ] {
        let (status, response) = call(&app, Method::POST, "/sessions/s1/timer", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["status"], "error");
        assert!(response["message"].as_str().unwrap().contains("duration_seconds"));
    }

    let (_, body) = call(&app, Method::GET, "/sessions/s1/timer", None).await;
    assert!(body["remaining_seconds"].is_null());
}

#[tokio::test]
async fn test_polling_keeps_timer_past_idle_limit() {
    let (app, state, clock) = app();

    call(&app, Method::POST, "/sessions/s1/timer", Some(json!({"duration_seconds": 3600}))).await;
    for _ in 0..40 {
        clock.advance(60);
        let (_, body) = call(&app, Method::GET, "/sessions/s1/timer", None).await;
        assert_eq!(body["status"], "RUNNING");
        assert_eq!(state.sweep_idle_sessions().unwrap(), 0);
    }

    let (_, body) = call(&app, Method::GET, "/sessions/s1/timer", None).await;
    assert_eq!(body["remaining_seconds"], 1200);
}

#[tokio::test]
async fn test_expired_timer_reports_zero() {
    let (app, _, clock) = app();

    call(&app, Method::POST, "/sessions/s1/timer", Some(json!({"duration_seconds": 60}))).await;
    clock.advance(3600);

    for _ in 0..2 {
        let (status, body) = call(&app, Method::GET, "/sessions/s1/timer", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["remaining_seconds"], 0);
        assert_eq!(body["status"], "RUNNING");
        assert_eq!(body["display"], "00:00");
    }
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let (app, state, clock) = app();

    call(&app, Method::POST, "/sessions/alice/timer/pomodoro", None).await;
    clock.advance(60);
    call(&app, Method::POST, "/sessions/bob/timer/short-break", None).await;

    let (_, alice) = call(&app, Method::GET, "/sessions/alice/timer", None).await;
    let (_, bob) = call(&app, Method::GET, "/sessions/bob/timer", None).await;
    assert_eq!(alice["remaining_seconds"], 1440);
    assert_eq!(bob["remaining_seconds"], 300);

    let (_, status) = call(&app, Method::GET, "/status", None).await;
    assert_eq!(status["sessions"], 2);
    assert_eq!(state.sessions.len().unwrap(), 2);
}

#[tokio::test]
async fn test_display_updates_on_start_and_resume() {
    let (app, state, clock) = app();
    let mut rx = state.subscribe_display();

    call(&app, Method::POST, "/sessions/s1/timer/pomodoro", None).await;
    clock.advance(90);
    call(&app, Method::POST, "/sessions/s1/timer/pause", None).await;
    call(&app, Method::GET, "/sessions/s1/timer", None).await;
    call(&app, Method::POST, "/sessions/s1/timer/resume", None).await;

    let started = rx.try_recv().unwrap();
    assert_eq!(started.session_id, "s1");
    assert_eq!(started.clock, "25:00");
    let resumed = rx.try_recv().unwrap();
    assert_eq!(resumed.clock, "23:30");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_health() {
    let (app, _, _) = app();
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
