//! Coalesces a noisy event into at most one notification per animation frame.
//!
//! Every source event calls [`Throttle::trigger`]; only the first one since the last
//! flush asks for a frame. When that frame runs, [`Throttle::flush`] releases the latch
//! and reports that the coalesced event should be republished.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// First event since the last flush; schedule a frame.
    Schedule,
    /// A frame is already scheduled.
    Coalesced,
}

#[derive(Debug, Default)]
pub struct Throttle {
    running: bool,
    received: u64,
    published: u64,
}

impl Throttle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&mut self) -> Trigger {
        self.received += 1;
        if self.running {
            return Trigger::Coalesced;
        }
        self.running = true;
        Trigger::Schedule
    }

    /// Called from the scheduled frame. Returns whether to republish.
    pub fn flush(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.published += 1;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Source events seen so far.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Coalesced events republished so far.
    pub fn published(&self) -> u64 {
        self.published
    }
}
