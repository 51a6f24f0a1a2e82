//! Time sources for the playback budget.

use std::time::{Duration, Instant};

/// Measures how long a run has been going.
///
/// The player reports every segment it hands to the sink through
/// `advance`; wall-clock sources ignore it, simulated ones count it.
pub trait Clock {
    /// Time since the clock was created.
    fn elapsed(&self) -> Duration;

    /// Called after `played` worth of audio has been written.
    fn advance(&mut self, _played: Duration) {}
}

/// Real elapsed time.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Time measured in audio written, not in real time.
///
/// Lets a run against an offline sink follow the same budget decisions a
/// real-time run would.
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamClock {
    played: Duration,
}

impl StreamClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for StreamClock {
    fn elapsed(&self) -> Duration {
        self.played
    }

    fn advance(&mut self, played: Duration) {
        self.played += played;
    }
}
