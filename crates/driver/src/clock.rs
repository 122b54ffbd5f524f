use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of wall time for the game loop.
pub trait Clock {
    /// Seconds since an arbitrary fixed origin. Never decreases.
    fn now(&self) -> f64;

    /// Block for `seconds`.
    fn sleep(&mut self, seconds: f64);
}

/// Monotonic system clock backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn sleep(&mut self, seconds: f64) {
        if seconds > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(seconds));
        }
    }
}

/// Clock that only moves when told to.
///
/// Sleeping advances it instantly. Clones share the same time, so a frontend
/// can hold one to simulate frame work while the loop holds another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
    slept: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, seconds: f64) {
        debug_assert!(seconds >= 0.0, "clock cannot run backwards");
        self.now.set(self.now.get() + seconds);
    }

    /// Total time spent in [`Clock::sleep`].
    pub fn slept(&self) -> f64 {
        self.slept.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn sleep(&mut self, seconds: f64) {
        if seconds > 0.0 {
            self.advance(seconds);
            self.slept.set(self.slept.get() + seconds);
        }
    }
}
