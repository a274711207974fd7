//! Wall-clock frame pacing

use std::thread;
use std::time::{Duration, Instant};

use lanerush_common::FrameRate;

use crate::game::platform::Pacer;

/// Sleeps out the rest of each frame's budget
pub struct FrameClock {
    budget: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(rate: FrameRate) -> Self {
        Self {
            budget: Duration::from_secs_f64(rate.frame_budget_ms() / 1000.0),
            last: Instant::now(),
        }
    }
}

impl Pacer for FrameClock {
    fn tick(&mut self) -> u64 {
        let elapsed = self.last.elapsed();
        if elapsed < self.budget {
            thread::sleep(self.budget - elapsed);
        }
        let now = Instant::now();
        let delta = now.duration_since(self.last);
        self.last = now;
        delta.as_millis() as u64
    }

    fn hold(&mut self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
        // Frames after a hold start a fresh budget
        self.last = Instant::now();
    }
}
