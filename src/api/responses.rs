//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    display::{format_clock, NO_TIMER_DISPLAY},
    timer::{TimerSnapshot, TimerStatus},
};

/// Generic apology returned when the timer could not be read or written
pub const APOLOGY_MESSAGE: &str = "Sorry, something went wrong with your timer. Please try again.";

/// Request body for starting a timer of arbitrary length
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimerRequest {
    pub duration_seconds: u64,
}

/// Response for every timer endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub session_id: String,
    pub action: String,
    /// Whether the action changed anything (false for pause/resume in the wrong state)
    pub applied: bool,
    pub status: Option<TimerStatus>,
    pub remaining_seconds: Option<u64>,
    /// `MM:SS`, or `--:--` without a timer
    pub display: String,
    pub timestamp: DateTime<Utc>,
}

impl TimerResponse {
    /// Build a response from the timer as it stands after the action
    pub fn new(session_id: &str, action: &str, applied: bool, snapshot: Option<TimerSnapshot>) -> Self {
        Self {
            session_id: session_id.to_string(),
            action: action.to_string(),
            applied,
            status: snapshot.map(|s| s.status),
            remaining_seconds: snapshot.map(|s| s.remaining),
            display: snapshot
                .map(|s| format_clock(s.remaining))
                .unwrap_or_else(|| NO_TIMER_DISPLAY.to_string()),
            timestamp: Utc::now(),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }

    pub fn apology() -> Self {
        Self::new(APOLOGY_MESSAGE.to_string())
    }
}

/// Server status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub sessions: usize,
    pub timer_key: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
