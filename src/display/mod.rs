//! Display refresh plumbing
//!
//! Turns timer snapshots into `MM:SS` updates for whatever visual surface is
//! listening. The timer core never depends on this module; it only sees the
//! [`DisplayHook`] trait.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::timer::{DisplayHook, TimerSnapshot, TimerStatus};

/// Shown when a session has no timer
pub const NO_TIMER_DISPLAY: &str = "--:--";

/// Format seconds as zero-padded `MM:SS` (minutes keep growing past 99)
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// One refresh for a session's visual surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayUpdate {
    pub session_id: String,
    pub clock: String,
    pub status: TimerStatus,
    pub remaining_seconds: u64,
    pub at: DateTime<Utc>,
}

/// Hook that publishes display updates for one session on a broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastDisplay {
    session_id: String,
    tx: broadcast::Sender<DisplayUpdate>,
}

impl BroadcastDisplay {
    pub fn new(session_id: impl Into<String>, tx: broadcast::Sender<DisplayUpdate>) -> Self {
        Self {
            session_id: session_id.into(),
            tx,
        }
    }
}

impl DisplayHook for BroadcastDisplay {
    fn timer_changed(&self, snapshot: &TimerSnapshot) {
        // Nothing to count down on screen once the timer is at zero
        if snapshot.remaining == 0 {
            debug!("Skipping display refresh for session {}: no time left", self.session_id);
            return;
        }

        let update = DisplayUpdate {
            session_id: self.session_id.clone(),
            clock: format_clock(snapshot.remaining),
            status: snapshot.status,
            remaining_seconds: snapshot.remaining,
            at: snapshot.at,
        };

        // An error here only means nobody is subscribed right now
        if let Err(e) = self.tx.send(update) {
            warn!("No display listeners for session {}: {}", self.session_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(90), "01:30");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn test_broadcast_display_publishes_remaining() {
        let (tx, mut rx) = broadcast::channel(4);
        let hook = BroadcastDisplay::new("session-1", tx);

        hook.timer_changed(&TimerSnapshot {
            status: TimerStatus::Running,
            duration: 300,
            remaining: 299,
            at: t0(),
        });

        let update = rx.try_recv().unwrap();
        assert_eq!(update.session_id, "session-1");
        assert_eq!(update.clock, "04:59");
        assert_eq!(update.remaining_seconds, 299);
        assert_eq!(update.at, t0());
    }

    #[test]
    fn test_broadcast_display_skips_expired_timer() {
        let (tx, mut rx) = broadcast::channel(4);
        let hook = BroadcastDisplay::new("session-1", tx);

        hook.timer_changed(&TimerSnapshot {
            status: TimerStatus::Running,
            duration: 300,
            remaining: 0,
            at: t0(),
        });

        assert!(rx.try_recv().is_err());
    }
}
