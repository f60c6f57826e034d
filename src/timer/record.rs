//! Persisted timer record and its pure transitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the stored timer is counting down or frozen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimerStatus {
    Running,
    Paused,
}

impl TimerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Running => "RUNNING",
            TimerStatus::Paused => "PAUSED",
        }
    }
}

/// The single timer kept in a session bag
///
/// Serialized as `{"startTime": <epoch millis>, "duration": n, "remaining": n,
/// "status": "RUNNING"|"PAUSED"}`. `remaining` is only authoritative while
/// paused; a running timer derives it from `start_time` on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    /// Epoch milliseconds of the moment the timer last entered RUNNING
    pub start_time: i64,
    pub duration: u64,
    pub remaining: u64,
    pub status: TimerStatus,
}

impl Timer {
    /// A fresh running timer of `duration` seconds starting at `now`
    pub fn started(now: DateTime<Utc>, duration: u64) -> Self {
        Self {
            start_time: now.timestamp_millis(),
            duration,
            remaining: duration,
            status: TimerStatus::Running,
        }
    }

    /// Whole seconds since `start_time`, floored; a clock that went backwards counts as zero
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> u64 {
        let delta_ms = now.timestamp_millis().saturating_sub(self.start_time);
        if delta_ms <= 0 {
            0
        } else {
            (delta_ms / 1000) as u64
        }
    }

    /// Seconds left at `now`
    pub fn remaining_at(&self, now: DateTime<Utc>) -> u64 {
        match self.status {
            TimerStatus::Paused => self.remaining,
            TimerStatus::Running => self.duration.saturating_sub(self.elapsed_at(now)),
        }
    }

    /// RUNNING -> PAUSED, freezing the remainder. Returns false in any other state.
    pub fn pause(&mut self, now: DateTime<Utc>) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.remaining = self.remaining_at(now);
        self.status = TimerStatus::Paused;
        true
    }

    /// PAUSED -> RUNNING; the frozen remainder becomes the new full interval
    pub fn resume(&mut self, now: DateTime<Utc>) -> bool {
        if self.status != TimerStatus::Paused {
            return false;
        }
        self.start_time = now.timestamp_millis();
        self.duration = self.remaining;
        self.status = TimerStatus::Running;
        true
    }
}
