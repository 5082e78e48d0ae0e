use std::time::{Duration, Instant};

/// Time source seam so the guard can be driven manually in tests.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Minimum-interval guard for user-triggered actions: the first call passes
/// and arms the window, calls inside the window are dropped (not queued),
/// and a call at or after expiry passes and re-arms.
pub struct MinIntervalGuard {
    interval: Duration,
    last_pass: Option<Instant>,
    clock: Box<dyn Clock + Send>,
}

impl MinIntervalGuard {
    pub fn new(interval: Duration) -> MinIntervalGuard {
        MinIntervalGuard::with_clock(interval, Box::new(SystemClock))
    }

    pub fn with_clock(interval: Duration, clock: Box<dyn Clock + Send>) -> MinIntervalGuard {
        MinIntervalGuard {
            interval,
            last_pass: None,
            clock,
        }
    }

    /// True when the action may run now; records the pass time.
    pub fn try_acquire(&mut self) -> bool {
        let now = self.clock.now();
        match self.last_pass {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last_pass = Some(now);
                true
            }
        }
    }
}

impl std::fmt::Debug for MinIntervalGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinIntervalGuard")
            .field("interval", &self.interval)
            .field("last_pass", &self.last_pass)
            .finish()
    }
}
