//! Countdown timer module
//!
//! The persisted record, the clocks it is measured against, the state
//! machine that drives it, and the named interval presets.

pub mod clock;
pub mod interval;
pub mod machine;
pub mod record;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use interval::Interval;
pub use machine::{DisplayHook, TimerSnapshot, TimerStateMachine, DEFAULT_TIMER_KEY};
pub use record::{Timer, TimerStatus};
