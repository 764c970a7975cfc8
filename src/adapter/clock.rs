//! Simulation clock shared by actors and the turn driver.

use std::time::Duration;

use parking_lot::{Condvar, Mutex};

/// Monotonic tick counter. Threads block in [`Clock::wait_until`] until the
/// driver has advanced the clock far enough.
#[derive(Debug, Default)]
pub struct Clock {
    tick:     Mutex<u64>,
    advanced: Condvar
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&self) -> u64 {
        *self.tick.lock()
    }

    /// Move to the next tick and wake every waiting thread.
    pub fn advance(&self) -> u64 {
        let mut tick = self.tick.lock();
        *tick += 1;
        self.advanced.notify_all();
        *tick
    }

    /// Block until the clock reaches `target`.
    pub fn wait_until(&self, target: u64) {
        let mut tick = self.tick.lock();
        while *tick < target {
            self.advanced.wait(&mut tick);
        }
    }

    /// Like [`wait_until`](Self::wait_until) but gives up after `timeout`.
    /// Returns whether `target` was reached.
    pub fn wait_until_for(&self, target: u64, timeout: Duration) -> bool {
        let mut tick = self.tick.lock();
        while *tick < target {
            if self.advanced.wait_for(&mut tick, timeout).timed_out() {
                return *tick >= target;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    #[test]
    fn test_advance_is_monotonic() {
        let clock = Clock::new();
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.advance(), 1);
        assert_eq!(clock.advance(), 2);
        assert_eq!(clock.tick(), 2);
    }

    #[test]
    fn test_wait_until_past_tick_returns_immediately() {
        let clock = Clock::new();
        clock.advance();
        clock.wait_until(1);
        clock.wait_until(0);
    }

    #[test]
    fn test_waiter_wakes_on_advance() {
        let clock = Arc::new(Clock::new());
        let waiter = {
            let clock = clock.clone();
            thread::spawn(move || clock.wait_until(2))
        };

        clock.advance();
        clock.advance();

        waiter.join().unwrap();
        assert_eq!(clock.tick(), 2);
    }

    #[test]
    fn test_wait_until_for_times_out() {
        let clock = Clock::new();
        assert!(!clock.wait_until_for(1, Duration::from_millis(10)));
    }
}
