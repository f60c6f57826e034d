//! Main application state management

use std::{sync::Arc, time::Instant};
use tokio::sync::broadcast;
use tracing::info;

use crate::{
    config::Config,
    display::{BroadcastDisplay, DisplayUpdate},
    error::StoreError,
    session::{SessionHandle, SessionRegistry},
    timer::{Clock, Interval, SharedClock, TimerStateMachine},
};

/// Timer state machine bound to one session of the running server
pub type SessionTimer = TimerStateMachine<SessionHandle, SharedClock>;

/// Shared state handed to every HTTP handler and background task
pub struct AppState {
    /// Live sessions and their attribute bags
    pub sessions: SessionRegistry,
    /// Wall clock all timers are measured against
    pub clock: SharedClock,
    /// Attribute key timers are stored under
    pub timer_key: String,
    /// Interval lengths and sweep settings
    pub config: Config,
    /// Server metadata
    pub start_time: Instant,
    /// Display refresh notifications
    pub display_tx: broadcast::Sender<DisplayUpdate>,
}

impl AppState {
    /// Create a new AppState from configuration and a clock
    pub fn new(config: Config, clock: SharedClock) -> Self {
        let (display_tx, _) = broadcast::channel(100);

        Self {
            sessions: SessionRegistry::new(),
            clock,
            timer_key: config.timer_key.clone(),
            config,
            start_time: Instant::now(),
            display_tx,
        }
    }

    /// Build the timer for a session, with display refresh wired to the broadcast channel
    pub fn timer(&self, session_id: &str) -> SessionTimer {
        let handle = self.sessions.handle(session_id, self.clock.now());
        TimerStateMachine::new(handle, Arc::clone(&self.clock))
            .with_key(self.timer_key.clone())
            .with_display(BroadcastDisplay::new(session_id, self.display_tx.clone()))
    }

    /// Configured length of an interval in seconds
    pub fn interval_seconds(&self, interval: Interval) -> u64 {
        self.config.interval_seconds(interval)
    }

    /// Subscribe to display refresh notifications
    pub fn subscribe_display(&self) -> broadcast::Receiver<DisplayUpdate> {
        self.display_tx.subscribe()
    }

    /// Drop sessions that have been idle longer than the configured limit
    pub fn sweep_idle_sessions(&self) -> Result<usize, StoreError> {
        let evicted = self.sessions.evict_idle(self.clock.now(), self.config.session_idle_limit())?;
        if evicted > 0 {
            info!("Evicted {} idle session(s)", evicted);
        }
        Ok(evicted)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
