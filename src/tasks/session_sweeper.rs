//! Idle session sweeper background task

use std::{sync::Arc, time::Duration};
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Background task that periodically drops sessions (and their timers) that went idle
pub async fn session_sweeper_task(state: Arc<AppState>) {
    info!(
        "Starting session sweeper task (every {}s, idle limit {}min)",
        state.config.sweep_interval_secs, state.config.session_idle_minutes
    );

    let mut interval = interval(Duration::from_secs(state.config.sweep_interval_secs.max(1)));

    loop {
        interval.tick().await;

        match state.sweep_idle_sessions() {
            Ok(0) => debug!("No idle sessions to sweep"),
            Ok(_) => {}
            Err(e) => warn!("Failed to sweep idle sessions: {}", e),
        }
    }
}
