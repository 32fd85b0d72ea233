//! Movement clock
//!
//! Decouples the snake's logical move cadence from the rate at which the
//! caller steps the simulation. The caller feeds elapsed time; the clock
//! reports when enough has accumulated for one move.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What happens to accumulated time beyond the interval when a move triggers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvershootPolicy {
    /// Reset the accumulator to zero, dropping any overshoot
    #[default]
    Discard,
    /// Subtract the interval and keep the remainder for the next move
    Carry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovementClock {
    elapsed: Duration,
    interval: Duration,
    initial_interval: Duration,
    min_interval: Duration,
    speed_factor: f64,
    overshoot: OvershootPolicy,
}

impl MovementClock {
    pub fn new(initial_interval: Duration, min_interval: Duration, speed_factor: f64) -> Self {
        Self {
            elapsed: Duration::ZERO,
            interval: initial_interval,
            initial_interval,
            min_interval,
            speed_factor,
            overshoot: OvershootPolicy::default(),
        }
    }

    pub fn with_overshoot(mut self, overshoot: OvershootPolicy) -> Self {
        self.overshoot = overshoot;
        self
    }

    /// Add `delta` to the accumulator and report whether a move triggers.
    ///
    /// At most one move is reported per call, whatever the size of `delta`.
    pub fn accumulate(&mut self, delta: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed < self.interval {
            return false;
        }

        self.elapsed = match self.overshoot {
            OvershootPolicy::Discard => Duration::ZERO,
            // Backlog is capped at one interval: at most one queued move.
            OvershootPolicy::Carry => (self.elapsed - self.interval).min(self.interval),
        };
        true
    }

    /// Shrink the interval: `max(min, floor(interval * speed_factor))` in whole ms
    pub fn speed_up(&mut self) {
        let scaled = (self.interval.as_millis() as f64 * self.speed_factor).floor() as u64;
        self.interval = Duration::from_millis(scaled).max(self.min_interval);
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.interval = self.initial_interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
