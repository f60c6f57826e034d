//! Pomodoro Session - session-scoped countdown timers over HTTP
//!
//! This is the main entry point for the pomodoro-session server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_session::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::{display_refresh_task, session_sweeper_task},
    timer::{SharedClock, SystemClock},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_session={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-session server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, pomodoro={}min, short break={}min, long break={}min",
        config.host, config.port, config.pomodoro_minutes, config.short_break_minutes, config.long_break_minutes
    );

    let addr = config.address();
    let clock: SharedClock = Arc::new(SystemClock);
    let state = Arc::new(AppState::new(config, clock));

    let sweeper_state = Arc::clone(&state);
    tokio::spawn(async move {
        session_sweeper_task(sweeper_state).await;
    });

    let display_state = Arc::clone(&state);
    tokio::spawn(async move {
        display_refresh_task(display_state).await;
    });

    let app = create_router(state);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /sessions/:id/timer            - Start a timer ({{\"duration_seconds\": n}})");
    info!("  POST   /sessions/:id/timer/:interval  - Start pomodoro | short-break | long-break");
    info!("  GET    /sessions/:id/timer            - Remaining time");
    info!("  POST   /sessions/:id/timer/pause      - Pause");
    info!("  POST   /sessions/:id/timer/resume     - Resume");
    info!("  DELETE /sessions/:id/timer            - Cancel");
    info!("  GET    /status                        - Server status");
    info!("  GET    /health                        - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
