use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use foundation::time::Time;

/// Source of "now" for the frame loop.
pub trait Clock {
    fn now(&self) -> Time;
}

/// Wall clock measured from construction.
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
    fn now(&self) -> Time {
        Time(self.origin.elapsed().as_secs_f64() * 1000.0)
    }
}

/// Hand-driven clock. Clones share the same timeline, so a test can keep one
/// handle while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(time: Time) -> Self {
        Self {
            now_ms: Rc::new(Cell::new(time.0)),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }

    pub fn set(&self, time: Time) {
        self.now_ms.set(time.0);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Time {
        Time(self.now_ms.get())
    }
}
