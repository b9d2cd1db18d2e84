//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f64,
    total_time: f64,
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
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f64();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Accumulator that gates a fixed-interval simulation tick.
///
/// The cinematic camera path runs every frame, while the discrete scene
/// animation advances only when enough wall-clock time has banked up.
pub struct FixedStepAccumulator {
    interval: f64,
    accumulated: f64,
}

impl FixedStepAccumulator {
    /// Create an accumulator firing every `interval` seconds.
    pub fn new(interval: f64) -> Self {
        Self {
            interval: interval.max(f64::EPSILON),
            accumulated: 0.0,
        }
    }

    /// Banks `dt` seconds and returns how many whole ticks are now due.
    pub fn advance(&mut self, dt: f64) -> u32 {
        self.accumulated += dt.max(0.0);
        let mut ticks = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            ticks += 1;
        }
        ticks
    }

    /// The configured tick interval in seconds.
    pub fn interval(&self) -> f64 {
        self.interval
    }
}
