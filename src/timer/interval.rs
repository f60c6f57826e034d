//! Named work/break intervals

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// The three pomodoro interval kinds a session can start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interval {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl Interval {
    /// Conventional length in minutes
    pub fn default_minutes(&self) -> u64 {
        match self {
            Interval::Pomodoro => 25,
            Interval::ShortBreak => 5,
            Interval::LongBreak => 15,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Pomodoro => "pomodoro",
            Interval::ShortBreak => "short-break",
            Interval::LongBreak => "long-break",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pomodoro" => Ok(Interval::Pomodoro),
            "short-break" | "short_break" => Ok(Interval::ShortBreak),
            "long-break" | "long_break" => Ok(Interval::LongBreak),
            other => Err(format!("Unknown interval: {}", other)),
        }
    }
}
