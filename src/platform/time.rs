//! Clock and frame pacing

use std::thread;
use std::time::{Duration, Instant};

/// Milliseconds since the program started
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Caps the loop at a fixed frame rate by sleeping off the remainder of each frame
#[derive(Debug)]
pub struct FrameLimiter {
    frame: Duration,
    next: Instant,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Self::frame_duration(fps),
            next: Instant::now(),
        }
    }

    pub fn frame_duration(fps: u32) -> Duration {
        Duration::from_secs_f64(1.0 / fps.max(1) as f64)
    }

    /// Block until the next frame is due
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
            self.next += self.frame;
        } else {
            // Running behind: don't try to catch up with a burst of frames
            self.next = now + self.frame;
        }
    }
}
