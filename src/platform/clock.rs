//! Wall-clock implementation of [`Clock`]

use std::thread;
use std::time::{Duration, Instant};

use super::Clock;

/// Milliseconds since construction, sleeping the current thread to wait
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn wait_millis(&mut self, millis: u64) {
        thread::sleep(Duration::from_millis(millis));
    }
}
