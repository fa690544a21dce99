//! The single countdown both players share. It is not a pair of chess clocks:
//! whoever has the move when it hits zero loses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub minutes: u64,
    pub seconds: u64,
}

impl ClockReading {
    pub fn from_seconds(total: u64) -> Self {
        ClockReading { minutes: total / 60, seconds: total % 60 }
    }

    pub fn total_seconds(&self) -> u64 { self.minutes * 60 + self.seconds }
}

impl fmt::Display for ClockReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameClock {
    remaining_secs: u64,
    running: bool,
}

impl GameClock {
    pub fn new(duration: Duration) -> Self {
        let remaining_secs = duration.as_secs();
        GameClock { remaining_secs, running: remaining_secs > 0 }
    }

    pub fn remaining(&self) -> ClockReading { ClockReading::from_seconds(self.remaining_secs) }

    pub fn is_expired(&self) -> bool { self.remaining_secs == 0 }

    pub fn is_running(&self) -> bool { self.running }

    pub fn stop(&mut self) { self.running = false; }

    /// Takes one second off a running clock and reports whether this tick ran
    /// it out. A stopped or expired clock does not move.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.running = false;
            return true;
        }
        false
    }
}

/// Turns wall time into whole-second ticks, carrying the leftover fraction.
#[derive(Debug, Default, Clone)]
pub struct TickAccumulator {
    carry: Duration,
}

impl TickAccumulator {
    pub fn ticks_due(&mut self, elapsed: Duration) -> u64 {
        let total = self.carry + elapsed;
        let ticks = total.as_secs();
        self.carry = total - Duration::from_secs(ticks);
        ticks
    }
}
