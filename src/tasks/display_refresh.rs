//! Display refresh background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use crate::state::AppState;

/// Background task that forwards display refreshes to the log until the channel closes
pub async fn display_refresh_task(state: Arc<AppState>) {
    info!("Starting display refresh task");

    let mut display_rx = state.subscribe_display();

    loop {
        match display_rx.recv().await {
            Ok(update) => {
                info!(
                    session = %update.session_id,
                    status = update.status.as_str(),
                    "Display refresh: {} remaining",
                    update.clock
                );
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Display refresh task lagged, skipped {} update(s)", skipped);
            }
            Err(RecvError::Closed) => {
                error!("Display channel closed, stopping display refresh task");
                break;
            }
        }
    }
}
