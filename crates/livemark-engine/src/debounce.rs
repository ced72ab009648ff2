//! # Debounce Scheduler
//!
//! A single-shot, reset-on-edit timer. Every text change pushes the deadline
//! out by the interval; the inline scanner runs only once the deadline passes
//! without another change.
//!
//! There is no background thread. The host polls (typically from its event
//! loop) and the timer fires at most once per quiet period, so two scan passes
//! can never overlap. Resetting the timer cancels a pending pass; a pass that
//! has started always runs to completion.

use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

/// Source of "now" for the scheduler.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(250);

    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Records a change at `now`, (re)starting the timer.
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Returns true exactly once when the deadline has passed, disarming the
    /// timer.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the timer fires, for hosts that sleep between polls.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn idle_timer_never_fires() {
        let clock = ManualClock::new();
        let mut d = Debouncer::default();
        clock.advance(MS * 1000);
        assert!(!d.poll(clock.now()));
        assert!(!d.is_pending());
    }

    #[test]
    fn fires_once_after_quiet_period() {
        let clock = ManualClock::new();
        let mut d = Debouncer::new(MS * 200);
        d.touch(clock.now());

        clock.advance(MS * 199);
        assert!(!d.poll(clock.now()));
        clock.advance(MS);
        assert!(d.poll(clock.now()));
        assert!(!d.poll(clock.now()));
    }

    #[test]
    fn burst_of_changes_coalesces() {
        let clock = ManualClock::new();
        let mut d = Debouncer::new(MS * 200);
        let mut fired = 0;
        for _ in 0..10 {
            d.touch(clock.now());
            clock.advance(MS * 50);
            if d.poll(clock.now()) {
                fired += 1;
            }
        }
        assert_eq!(fired, 0);

        clock.advance(MS * 200);
        if d.poll(clock.now()) {
            fired += 1;
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn cancel_drops_pending_pass() {
        let clock = ManualClock::new();
        let mut d = Debouncer::new(MS * 10);
        d.touch(clock.now());
        d.cancel();
        clock.advance(MS * 20);
        assert!(!d.poll(clock.now()));
    }

    #[test]
    fn remaining_counts_down() {
        let clock = ManualClock::new();
        let mut d = Debouncer::new(MS * 100);
        assert_eq!(d.remaining(clock.now()), None);
        d.touch(clock.now());
        clock.advance(MS * 30);
        assert_eq!(d.remaining(clock.now()), Some(MS * 70));
        clock.advance(MS * 500);
        assert_eq!(d.remaining(clock.now()), Some(Duration::ZERO));
    }
}
