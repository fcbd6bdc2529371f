//! Frame timing: turning wall-clock time into `dt`, and frame-rate statistics.
//!
//! # Example
//!
//! ```ignore
//! use starfall::time::{FrameClock, FrameStats};
//!
//! let mut clock = FrameClock::new();
//! let mut stats = FrameStats::new();
//!
//! // In your frame loop:
//! let dt = clock.tick();
//! stats.record(dt);
//!
//! println!("Frame: {}", clock.frame());
//! println!("FPS (last 60): {:?}", stats.fps_60());
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Longest window [`FrameStats`] keeps.
pub const MAX_WINDOW: usize = 600;

/// Produces the `dt` handed to [`Simulation::update`](crate::Simulation::update).
///
/// The first [`tick`](FrameClock::tick) always returns 0, so the first frame
/// of a run changes nothing.
#[derive(Debug)]
pub struct FrameClock {
    /// When the clock was created.
    start: Instant,
    /// When the last tick happened; `None` before the first one.
    last_tick: Option<Instant>,
    /// Time since the last tick in seconds.
    delta_secs: f64,
    /// Ticks so far.
    frame_count: u64,
    /// Fixed step replacing wall time (headless runs and tests).
    fixed_delta: Option<f64>,
    /// Multiplier applied to every delta.
    time_scale: f64,
    /// Whether time is paused.
    paused: bool,
}

impl FrameClock {
    /// Create a clock starting now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last_tick: None,
            delta_secs: 0.0,
            frame_count: 0,
            fixed_delta: None,
            time_scale: 1.0,
            paused: false,
        }
    }

    /// Advance one frame and return its `dt` in seconds.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let first = self.last_tick.is_none();
        let raw = self
            .last_tick
            .map(|last| now.duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        self.frame_count += 1;

        self.delta_secs = if first || self.paused {
            0.0
        } else {
            self.fixed_delta.unwrap_or(raw) * self.time_scale
        };
        self.delta_secs
    }

    /// `dt` returned by the last tick.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta_secs
    }

    /// Ticks so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Wall time since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// While paused every tick returns 0.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Use a fixed step instead of wall time. `None` goes back to wall time.
    pub fn set_fixed_delta(&mut self, delta: Option<f64>) {
        self.fixed_delta = delta;
    }

    /// Set time scale multiplier.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed (slow motion)
    /// - `2.0` = double speed
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Rolling frame-rate statistics over the last 60, 120 and 600 frames.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    deltas: VecDeque<f64>,
    frames: u64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame. Zero deltas count as frames but are not sampled.
    pub fn record(&mut self, dt: f64) {
        self.frames += 1;
        if dt > 0.0 && dt.is_finite() {
            if self.deltas.len() == MAX_WINDOW {
                self.deltas.pop_front();
            }
            self.deltas.push_back(dt);
        }
    }

    /// Frames recorded so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Average frames per second over the last `window` samples, or `None`
    /// before anything has been sampled.
    pub fn fps(&self, window: usize) -> Option<f64> {
        let window = window.min(MAX_WINDOW);
        if window == 0 || self.deltas.is_empty() {
            return None;
        }
        let samples = self.deltas.iter().rev().take(window);
        let (count, total) = samples.fold((0usize, 0.0), |(n, sum), dt| (n + 1, sum + dt));
        Some(count as f64 / total)
    }

    pub fn fps_60(&self) -> Option<f64> {
        self.fps(60)
    }

    pub fn fps_120(&self) -> Option<f64> {
        self.fps(120)
    }

    pub fn fps_600(&self) -> Option<f64> {
        self.fps(600)
    }

    pub fn reset(&mut self) {
        self.deltas.clear();
        self.frames = 0;
    }
}
