//! Configuration and CLI argument handling

use chrono::Duration;
use clap::Parser;

use crate::timer::{Interval, DEFAULT_TIMER_KEY};

/// Upper bound for every minutes setting (one week)
pub const MAX_MINUTES: u64 = 7 * 24 * 60;

/// CLI argument parsing structure
#[derive(Debug, Clone, Parser)]
#[command(name = "pomodoro-session")]
#[command(about = "Session-scoped pomodoro countdown timers served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Length of a pomodoro work interval in minutes
    #[arg(long, default_value = "25", value_parser = clap::value_parser!(u64).range(1..=MAX_MINUTES))]
    pub pomodoro_minutes: u64,

    /// Length of a short break in minutes
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..=MAX_MINUTES))]
    pub short_break_minutes: u64,

    /// Length of a long break in minutes
    #[arg(long, default_value = "15", value_parser = clap::value_parser!(u64).range(1..=MAX_MINUTES))]
    pub long_break_minutes: u64,

    /// Minutes without activity before a session and its timer are dropped
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..=MAX_MINUTES))]
    pub session_idle_minutes: u64,

    /// How often idle sessions are swept, in seconds
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u64).range(1..=86_400))]
    pub sweep_interval_secs: u64,

    /// Session attribute key the timer record is stored under
    #[arg(long, default_value = DEFAULT_TIMER_KEY)]
    pub timer_key: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Configured length of an interval, in seconds (capped at [`MAX_MINUTES`])
    pub fn interval_seconds(&self, interval: Interval) -> u64 {
        let minutes = match interval {
            Interval::Pomodoro => self.pomodoro_minutes,
            Interval::ShortBreak => self.short_break_minutes,
            Interval::LongBreak => self.long_break_minutes,
        };
        minutes.min(MAX_MINUTES) * 60
    }

    /// How long a session may go without activity before it is dropped
    pub fn session_idle_limit(&self) -> Duration {
        Duration::minutes(self.session_idle_minutes.min(MAX_MINUTES) as i64)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 20554,
            host: "0.0.0.0".to_string(),
            pomodoro_minutes: Interval::Pomodoro.default_minutes(),
            short_break_minutes: Interval::ShortBreak.default_minutes(),
            long_break_minutes: Interval::LongBreak.default_minutes(),
            session_idle_minutes: 30,
            sweep_interval_secs: 60,
            timer_key: DEFAULT_TIMER_KEY.to_string(),
            verbose: false,
        }
    }
}
