//! Millisecond time sources for the loop

use instant::Instant;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A monotonic millisecond time source.
///
/// The loop reads it once at the top of every tick and twice around every
/// catch-up step to measure update cost. Readings are expected to be
/// non-decreasing; the loop clamps any regression to zero elapsed time.
pub trait Clock {
    /// Current time in milliseconds
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by a monotonic `Instant`, counted from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A hand-driven clock for tests, replays, and hosts with their own timebase.
///
/// Clones share the same time, so a test can keep one copy and hand another
/// to the loop. Scripted readings are consumed one per `now_ms` call; once the
/// script runs out the last reading repeats.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    inner: Rc<RefCell<ManualState>>,
}

#[derive(Debug, Default)]
struct ManualState {
    now: f64,
    script: VecDeque<f64>,
    reads: usize,
}

impl ManualClock {
    /// Create a clock reading `start` milliseconds
    pub fn new(start: f64) -> Self {
        let clock = Self::default();
        clock.set(start);
        clock
    }

    /// Jump to an absolute time
    pub fn set(&self, ms: f64) {
        self.inner.borrow_mut().now = ms;
    }

    /// Move time forward
    pub fn advance(&self, ms: f64) {
        self.inner.borrow_mut().now += ms;
    }

    /// Queue readings returned by the next `now_ms` calls, in order
    pub fn script(&self, readings: impl IntoIterator<Item = f64>) {
        self.inner.borrow_mut().script.extend(readings);
    }

    /// Number of times the clock has been read
    pub fn reads(&self) -> usize {
        self.inner.borrow().reads
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        let mut state = self.inner.borrow_mut();
        state.reads += 1;
        if let Some(next) = state.script.pop_front() {
            state.now = next;
        }
        state.now
    }
}
