use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};

/// Lets at most one call through per interval
///
/// The first call runs immediately and starts a cooldown; calls during the
/// cooldown are dropped. The first call after the cooldown runs and starts
/// a new one.
pub struct Throttle<F, C = SystemClock> {
    operation: F,
    interval: Duration,
    last_run: Option<Instant>,
    clock: C,
}

impl<F: FnMut()> Throttle<F, SystemClock> {
    pub fn new(operation: F, interval: Duration) -> Self {
        Self::with_clock(operation, interval, SystemClock)
    }
}

impl<F: FnMut(), C: Clock> Throttle<F, C> {
    pub fn with_clock(operation: F, interval: Duration, clock: C) -> Self {
        Self {
            operation,
            interval,
            last_run: None,
            clock,
        }
    }

    /// Returns true if the operation ran
    pub fn call(&mut self) -> bool {
        let now = self.clock.now();
        if let Some(last) = self.last_run {
            if now.saturating_duration_since(last) < self.interval {
                return false;
            }
        }
        self.last_run = Some(now);
        (self.operation)();
        true
    }

    pub fn is_cooling_down(&self) -> bool {
        self.last_run
            .is_some_and(|last| self.clock.now().saturating_duration_since(last) < self.interval)
    }
}
