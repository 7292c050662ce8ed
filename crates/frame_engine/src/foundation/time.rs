//! Time management utilities

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Source of the current time in seconds.
///
/// Game logic reads time through this trait so that score and timer
/// behavior can be driven deterministically in tests.
pub trait Clock {
    /// Current time in seconds since an arbitrary, fixed epoch
    fn now(&self) -> f64;
}

/// Monotonic clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    /// Create a clock whose epoch is the moment of creation
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }
}

/// Manually driven clock.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// advance the clock after handing another to the code under test.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    seconds: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock reading `seconds`
    pub fn new(seconds: f64) -> Self {
        Self { seconds: Rc::new(Cell::new(seconds)) }
    }

    /// Set the current time
    pub fn set(&self, seconds: f64) {
        self.seconds.set(seconds);
    }

    /// Move the clock forward by `seconds`
    pub fn advance(&self, seconds: f64) {
        self.seconds.set(self.seconds.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.seconds.get()
    }
}

/// Frame timer used by the engine loop for frame statistics
pub struct Timer {
    last_frame: Instant,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.total_time += now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
