//! Wall-clock sources for the mouth animation.
//!
//! The mouth phase is read from the wall clock rather than the frame timestamp, so the
//! renderer takes a [`Clock`] that tests can pin to a fixed instant.

use std::cell::Cell;

/// Something that knows the current time in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

impl<F> Clock for F
where
    F: Fn() -> f64,
{
    fn now_ms(&self) -> f64 {
        self()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: Cell<f64>,
}

impl FixedClock {
    pub fn new(now_ms: f64) -> Self {
        Self { now: Cell::new(now_ms) }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// The host's real clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        crate::platform::now_ms()
    }
}
