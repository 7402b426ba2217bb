use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};

/// Collapses a burst of calls into a single execution
///
/// In trailing mode the operation runs once `wait` has passed since the last
/// call. In leading mode (`invoke_immediately`) it runs on the first call of
/// a quiet period and later calls inside the window are swallowed.
///
/// Nothing runs on its own: the owner calls [`Debounce::poll`] from its tick
/// loop to release a due trailing execution.
pub struct Debounce<F, C = SystemClock> {
    operation: F,
    wait: Duration,
    invoke_immediately: bool,
    deadline: Option<Instant>,
    clock: C,
}

impl<F: FnMut()> Debounce<F, SystemClock> {
    pub fn new(operation: F, wait: Duration, invoke_immediately: bool) -> Self {
        Self::with_clock(operation, wait, invoke_immediately, SystemClock)
    }
}

impl<F: FnMut(), C: Clock> Debounce<F, C> {
    pub fn with_clock(operation: F, wait: Duration, invoke_immediately: bool, clock: C) -> Self {
        Self {
            operation,
            wait,
            invoke_immediately,
            deadline: None,
            clock,
        }
    }

    /// Register a call; returns true if the operation ran synchronously
    pub fn call(&mut self) -> bool {
        // A deadline that passed without a poll still counts as elapsed
        self.poll();

        let now = self.clock.now();
        let call_now = self.invoke_immediately && self.deadline.is_none();
        self.deadline = Some(now + self.wait);

        if call_now {
            (self.operation)();
        }
        call_now
    }

    /// Close the window if its deadline passed; returns true if the trailing
    /// execution ran
    pub fn poll(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if self.clock.now() >= deadline => {
                self.deadline = None;
                if !self.invoke_immediately {
                    (self.operation)();
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    /// A window is open (a trailing run is scheduled, or leading calls are suppressed)
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the current window closes
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::cell::Cell;

    #[test]
    fn test_burst_runs_once_after_quiet_period() {
        let clock = ManualClock::new();
        let runs = Cell::new(0);
        let mut debounce =
            Debounce::with_clock(|| runs.set(runs.get() + 1), Duration::from_millis(100), false, clock.clone());

        // 10 calls spread over 45ms
        for _ in 0..10 {
            assert!(!debounce.call());
            clock.advance_ms(5);
        }
        assert!(!debounce.poll());
        assert_eq!(runs.get(), 0);

        // Last call was at t=45ms; nothing before t=145ms
        clock.advance_ms(49);
        assert!(!debounce.poll());
        assert_eq!(runs.get(), 0);

        clock.advance_ms(51);
        assert!(debounce.poll());
        assert_eq!(runs.get(), 1);

        clock.advance_ms(500);
        assert!(!debounce.poll());
        assert_eq!(runs.get(), 1);
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_each_call_pushes_deadline() {
        let clock = ManualClock::new();
        let mut debounce = Debounce::with_clock(|| {}, Duration::from_millis(100), false, clock.clone());
        debounce.call();
        let first = debounce.deadline().unwrap();
        clock.advance_ms(60);
        debounce.call();
        assert_eq!(debounce.deadline().unwrap() - first, Duration::from_millis(60));
    }

    #[test]
    fn test_immediate_runs_first_call_and_suppresses_rest() {
        let clock = ManualClock::new();
        let runs = Cell::new(0);
        let mut debounce =
            Debounce::with_clock(|| runs.set(runs.get() + 1), Duration::from_millis(100), true, clock.clone());

        assert!(debounce.call());
        for _ in 0..9 {
            clock.advance_ms(5);
            assert!(!debounce.call());
        }
        assert_eq!(runs.get(), 1);

        // Window closes with no trailing execution
        clock.advance_ms(100);
        assert!(!debounce.poll());
        assert_eq!(runs.get(), 1);

        // A new quiet period starts with a synchronous run
        assert!(debounce.call());
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_immediate_call_inside_window_extends_it() {
        let clock = ManualClock::new();
        let runs = Cell::new(0);
        let mut debounce =
            Debounce::with_clock(|| runs.set(runs.get() + 1), Duration::from_millis(100), true, clock.clone());

        assert!(debounce.call());
        clock.advance_ms(90);
        assert!(!debounce.call());

        // t=150ms: past the first deadline, still inside the extended one
        clock.advance_ms(60);
        assert!(!debounce.poll());
        assert!(debounce.is_pending());
        assert!(!debounce.call());
        assert_eq!(runs.get(), 1);

        // Quiet for a full window after the last call
        clock.advance_ms(100);
        assert!(debounce.call());
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_overdue_trailing_run_fires_before_next_window() {
        let clock = ManualClock::new();
        let runs = Cell::new(0);
        let mut debounce =
            Debounce::with_clock(|| runs.set(runs.get() + 1), Duration::from_millis(50), false, clock.clone());

        debounce.call();
        clock.advance_ms(80);
        // No poll in between: the elapsed window still produces its run
        debounce.call();
        assert_eq!(runs.get(), 1);
        assert!(debounce.is_pending());
    }
}
