//! State management module
//!
//! Shared server state: the session registry, the clock and the display
//! channel every request works against.

pub mod app_state;

pub use app_state::{AppState, SessionTimer};
