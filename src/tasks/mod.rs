//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod display_refresh;
pub mod session_sweeper;

// Re-export main functions
pub use display_refresh::display_refresh_task;
pub use session_sweeper::session_sweeper_task;
