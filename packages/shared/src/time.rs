//! Time-related utilities with clock abstraction for testability.

use chrono::{Local, NaiveDateTime, SubsecRound};

/// Wall-clock format used in chat transcripts (`2006-01-02 15:04:05` style)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current local wall-clock time, truncated to whole seconds
    fn now(&self) -> NaiveDateTime;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        get_local_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: NaiveDateTime,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: NaiveDateTime) -> Self {
        Self {
            fixed_time: fixed_time.trunc_subsecs(0),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.fixed_time
    }
}

/// Get the current local time with second resolution
pub fn get_local_timestamp() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS`
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
