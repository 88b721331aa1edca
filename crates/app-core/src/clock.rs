use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

/// Source of elapsed seconds since the frame loop started, kept in f64.
pub trait TimeSource {
    fn elapsed_secs(&self) -> f64;
}

/// Wall clock backed by `instant`, which maps to `performance.now()` on wasm.
pub struct InstantClock {
    start: Instant,
}

impl InstantClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl TimeSource for InstantClock {
    fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for tests and offline replay. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl TimeSource for ManualClock {
    fn elapsed_secs(&self) -> f64 {
        self.now.get()
    }
}

/// Wraps a time source and never reports a value smaller than the last one.
pub struct Clock<T: TimeSource> {
    source: T,
    last: f64,
}

impl<T: TimeSource> Clock<T> {
    pub fn new(source: T) -> Self {
        Self { source, last: 0.0 }
    }

    pub fn sample(&mut self) -> f64 {
        let t = self.source.elapsed_secs();
        if t.is_finite() && t > self.last {
            self.last = t;
        }
        self.last
    }

    pub fn last(&self) -> f64 {
        self.last
    }
}
