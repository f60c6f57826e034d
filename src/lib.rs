//! Pomodoro Session - session-scoped countdown timers
//!
//! Each conversational session carries at most one work/break timer in its
//! attribute bag. Timers never tick on their own; remaining time is derived
//! from the stored start instant whenever someone asks.

pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod session;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{StoreError, TimerError};
pub use session::{MemorySessionStore, SessionStore};
pub use state::AppState;
pub use timer::{Clock, Interval, SystemClock, Timer, TimerStateMachine, TimerStatus};
pub use utils::signals::shutdown_signal;
