//! Timer state structure and management

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Tick interval of the seconds counter
pub const SECONDS_TICK: Duration = Duration::from_millis(50);
/// Tick interval of the minutes counter
pub const MINUTES_TICK: Duration = Duration::from_millis(150);

/// Selects one of the two counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Minutes,
    Seconds,
}

impl Counter {
    /// Delay between two automatic ticks of this counter
    pub fn tick_interval(self) -> Duration {
        match self {
            Counter::Minutes => MINUTES_TICK,
            Counter::Seconds => SECONDS_TICK,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Counter::Minutes => "minutes",
            Counter::Seconds => "seconds",
        }
    }

    /// Parse a counter from its route name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "minutes" => Some(Counter::Minutes),
            "seconds" => Some(Counter::Seconds),
            _ => None,
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two counters and their running flags.
///
/// `minutes` and `seconds` are two loosely coupled views of the same time:
/// `seconds` holds total seconds, not seconds within the minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub minutes: i64,
    pub seconds: i64,
    pub minutes_running: bool,
    pub seconds_running: bool,
}

impl TimerState {
    /// Create a stopped timer at zero
    pub fn new() -> Self {
        Self {
            minutes: 0,
            seconds: 0,
            minutes_running: false,
            seconds_running: false,
        }
    }

    /// Set minutes, keeping the seconds remainder within the minute
    pub fn set_minutes(&mut self, new_minutes: i64) {
        self.minutes = new_minutes;
        self.seconds = (self.seconds % 60).wrapping_add(new_minutes.wrapping_mul(60));
    }

    /// Set total seconds; minutes is overwritten from the new value
    pub fn set_seconds(&mut self, new_seconds: i64) {
        self.minutes = new_seconds / 60;
        self.seconds = new_seconds;
    }

    /// Dispatch to the setter of `counter`
    pub fn set(&mut self, counter: Counter, value: i64) {
        match counter {
            Counter::Minutes => self.set_minutes(value),
            Counter::Seconds => self.set_seconds(value),
        }
    }

    pub fn value(&self, counter: Counter) -> i64 {
        match counter {
            Counter::Minutes => self.minutes,
            Counter::Seconds => self.seconds,
        }
    }

    pub fn is_running(&self, counter: Counter) -> bool {
        match counter {
            Counter::Minutes => self.minutes_running,
            Counter::Seconds => self.seconds_running,
        }
    }

    pub fn set_running(&mut self, counter: Counter, running: bool) {
        match counter {
            Counter::Minutes => self.minutes_running = running,
            Counter::Seconds => self.seconds_running = running,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Flat persisted form of [`TimerState`]. Any key outside the four fields is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveRecord {
    pub minutes: i64,
    pub seconds: i64,
    #[serde(rename = "secondsPlaying")]
    pub seconds_playing: bool,
    #[serde(rename = "minutesPlaying")]
    pub minutes_playing: bool,
}

impl From<TimerState> for SaveRecord {
    fn from(state: TimerState) -> Self {
        Self {
            minutes: state.minutes,
            seconds: state.seconds,
            seconds_playing: state.seconds_running,
            minutes_playing: state.minutes_running,
        }
    }
}
