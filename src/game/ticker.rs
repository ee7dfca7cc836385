//! Owned tick handle for the per-frame game driver.
//!
//! The frame loop polls the timer once per rendered frame; the timer reports a due
//! tick at most once per cadence. Cancelling the timer is how pause, game over and
//! unmount stop the simulation.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Cancelled,
    Armed { last_tick: Option<Instant> },
}

/// Fixed-cadence tick timer driven by frame polls
#[derive(Debug, Clone)]
pub struct TickTimer {
    cadence: Duration,
    state: TimerState,
}

impl TickTimer {
    /// Create a cancelled timer
    pub fn new(cadence: Duration) -> Self {
        Self {
            cadence,
            state: TimerState::Cancelled,
        }
    }

    /// Start ticking. The first poll after arming is due immediately.
    /// Arming an armed timer keeps its current phase.
    pub fn arm(&mut self) {
        if self.state == TimerState::Cancelled {
            self.state = TimerState::Armed { last_tick: None };
        }
    }

    pub fn cancel(&mut self) {
        self.state = TimerState::Cancelled;
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, TimerState::Armed { .. })
    }

    /// Returns true when a tick is due at `now`, and records it as the last tick
    pub fn poll(&mut self, now: Instant) -> bool {
        let TimerState::Armed { last_tick } = &mut self.state else {
            return false;
        };

        let due = match *last_tick {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.cadence,
        };
        if due {
            *last_tick = Some(now);
        }
        due
    }
}
