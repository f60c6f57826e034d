//! Single-slot timer state machine over a session store
//!
//! States are NONE (no record under the key), RUNNING and PAUSED. Nothing
//! ticks in the background: every read recomputes the remainder from the
//! stored start instant and the injected clock.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::TimerError,
    session::{Attributes, SessionStore},
};
use super::{
    clock::{Clock, SystemClock},
    record::{Timer, TimerStatus},
};

/// Attribute key the timer record is stored under unless configured otherwise
pub const DEFAULT_TIMER_KEY: &str = "timer";

/// Point-in-time view of a timer, with the remainder already derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub duration: u64,
    pub remaining: u64,
    /// Clock reading the remainder was derived at
    pub at: DateTime<Utc>,
}

impl TimerSnapshot {
    fn of(timer: &Timer, now: DateTime<Utc>) -> Self {
        Self {
            status: timer.status,
            duration: timer.duration,
            remaining: timer.remaining_at(now),
            at: now,
        }
    }
}

/// Receives the timer state after it starts or resumes running
pub trait DisplayHook {
    fn timer_changed(&self, snapshot: &TimerSnapshot);
}

impl<F> DisplayHook for F
where
    F: Fn(&TimerSnapshot),
{
    fn timer_changed(&self, snapshot: &TimerSnapshot) {
        self(snapshot)
    }
}

/// Timer operations for one session
///
/// The machine owns no state of its own; the record lives in `store` under
/// `key`. Store failures are returned untouched for the caller to handle.
pub struct TimerStateMachine<S, C = SystemClock> {
    store: S,
    clock: C,
    key: String,
    display: Option<Box<dyn DisplayHook + Send + Sync>>,
}

impl<S: SessionStore, C: Clock> TimerStateMachine<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            key: DEFAULT_TIMER_KEY.to_string(),
            display: None,
        }
    }

    /// Store the record under a different attribute key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Attach a hook that is told about the timer after create and resume
    pub fn with_display<H>(mut self, hook: H) -> Self
    where
        H: DisplayHook + Send + Sync + 'static,
    {
        self.display = Some(Box::new(hook));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Start a new running timer, replacing any existing one
    ///
    /// `duration` must be at least one second.
    pub fn create(&mut self, duration: u64) -> Result<(), TimerError> {
        if duration == 0 {
            return Err(TimerError::InvalidDuration(duration));
        }

        let now = self.clock.now();
        let (mut attributes, previous) = self.load()?;
        if let Some(previous) = previous {
            debug!("Replacing {} timer under '{}'", previous.status.as_str(), self.key);
        }

        let timer = Timer::started(now, duration);
        self.save(&mut attributes, &timer)?;
        info!("Timer started for {}s", duration);

        self.notify(&timer, now);
        Ok(())
    }

    /// Seconds left, or `None` when no timer exists
    pub fn query_remaining(&self) -> Result<Option<u64>, TimerError> {
        Ok(self.snapshot()?.map(|snapshot| snapshot.remaining))
    }

    /// Status and derived remainder of the current timer, if any
    pub fn snapshot(&self) -> Result<Option<TimerSnapshot>, TimerError> {
        let now = self.clock.now();
        let (_, timer) = self.load()?;
        Ok(timer.map(|timer| TimerSnapshot::of(&timer, now)))
    }

    /// The stored record as-is
    pub fn timer(&self) -> Result<Option<Timer>, TimerError> {
        Ok(self.load()?.1)
    }

    /// Freeze a running timer. Returns `false` if there is nothing running.
    pub fn pause(&mut self) -> Result<bool, TimerError> {
        let now = self.clock.now();
        let (mut attributes, timer) = self.load()?;
        let Some(mut timer) = timer else {
            debug!("Pause requested with no timer");
            return Ok(false);
        };

        if !timer.pause(now) {
            debug!("Pause requested while {}", timer.status.as_str());
            return Ok(false);
        }

        self.save(&mut attributes, &timer)?;
        info!("Timer paused with {}s remaining", timer.remaining);
        Ok(true)
    }

    /// Restart a paused timer from its frozen remainder. Returns `false` if nothing is paused.
    pub fn resume(&mut self) -> Result<bool, TimerError> {
        let now = self.clock.now();
        let (mut attributes, timer) = self.load()?;
        let Some(mut timer) = timer else {
            debug!("Resume requested with no timer");
            return Ok(false);
        };

        if !timer.resume(now) {
            debug!("Resume requested while {}", timer.status.as_str());
            return Ok(false);
        }

        self.save(&mut attributes, &timer)?;
        info!("Timer resumed for {}s", timer.duration);

        self.notify(&timer, now);
        Ok(true)
    }

    /// Drop the timer if there is one
    pub fn cancel(&mut self) -> Result<(), TimerError> {
        let mut attributes = self.store.get()?;
        if attributes.remove(&self.key).is_some() {
            self.store.set(attributes)?;
            info!("Timer cancelled");
        }
        Ok(())
    }

    fn load(&self) -> Result<(Attributes, Option<Timer>), TimerError> {
        let attributes = self.store.get()?;
        let timer = match attributes.get(&self.key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                serde_json::from_value::<Timer>(value.clone()).map_err(|source| {
                    TimerError::CorruptRecord {
                        key: self.key.clone(),
                        source,
                    }
                })?,
            ),
        };
        Ok((attributes, timer))
    }

    fn save(&mut self, attributes: &mut Attributes, timer: &Timer) -> Result<(), TimerError> {
        let value = serde_json::to_value(timer).map_err(|source| TimerError::CorruptRecord {
            key: self.key.clone(),
            source,
        })?;
        attributes.insert(self.key.clone(), value);
        self.store.set(std::mem::take(attributes))?;
        Ok(())
    }

    fn notify(&self, timer: &Timer, now: DateTime<Utc>) {
        if let Some(display) = &self.display {
            display.timer_changed(&TimerSnapshot::of(timer, now));
        }
    }
}
