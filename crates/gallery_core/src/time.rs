//! Frame timing utilities.
//!
//! The host owns a [`TimeClock`] and calls `tick()` once per frame; the
//! resulting [`Time`] snapshot's `delta` is what gets passed to
//! `FirstPersonController::update`.  The controller never reads a clock on
//! its own.
//!
//! # Example
//! ```rust,ignore
//! let mut clock = TimeClock::new();
//! loop {
//!     let time = clock.tick();
//!     controller.update(time.delta);
//! }
//! ```

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// A snapshot of timing information for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    /// Seconds elapsed since the previous frame.  Only capped when the
    /// clock was built with [`TimeClock::with_max_delta`].
    pub delta: f32,

    /// Total seconds elapsed since the clock started.
    pub elapsed: f64,

    /// Number of frames ticked so far (starts at 0 for the first frame).
    pub frame_count: u64,

    /// Instantaneous frames-per-second of the measured, uncapped delta.
    pub fps: f32,
}

impl Time {
    fn from_raw(raw_dt: f32, elapsed: f64, frame_count: u64, max_delta: Option<f32>) -> Self {
        let raw_dt = raw_dt.max(0.0);
        let delta = match max_delta {
            Some(max) => raw_dt.min(max),
            None => raw_dt,
        };
        let fps = if raw_dt > 0.0 { 1.0 / raw_dt } else { 0.0 };
        Self { delta, elapsed, frame_count, fps }
    }
}

// ─── Clock ─────────────────────────────────────────────────────────────────

/// Stateful timer that produces [`Time`] snapshots.
pub struct TimeClock {
    start: Instant,
    last_tick: Instant,
    frame_count: u64,
    max_delta: Option<f32>,
}

impl TimeClock {
    /// Create a new clock, starting the epoch now.  Deltas are reported as
    /// measured.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            frame_count: 0,
            max_delta: None,
        }
    }

    /// Create a clock whose deltas never exceed `max_delta` seconds.
    pub fn with_max_delta(max_delta: f32) -> Self {
        Self {
            max_delta: Some(max_delta.max(0.0)),
            ..Self::new()
        }
    }

    /// Return the current [`Time`] without advancing the clock.
    ///
    /// Event callbacks use this to timestamp things (tooltips) without
    /// stealing the frame's delta.
    pub fn peek(&self) -> Time {
        let now = Instant::now();
        let raw_dt = (now - self.last_tick).as_secs_f32();
        let elapsed = (now - self.start).as_secs_f64();
        Time::from_raw(raw_dt, elapsed, self.frame_count, self.max_delta)
    }

    /// Advance by one frame.  Returns the [`Time`] snapshot for this frame.
    pub fn tick(&mut self) -> Time {
        let now = Instant::now();
        let raw_dt = (now - self.last_tick).as_secs_f32();
        let elapsed = (now - self.start).as_secs_f64();
        let time = Time::from_raw(raw_dt, elapsed, self.frame_count, self.max_delta);

        self.last_tick = now;
        self.frame_count += 1;
        time
    }

    pub fn max_delta(&self) -> Option<f32> {
        self.max_delta
    }
}

impl Default for TimeClock {
    fn default() -> Self {
        Self::new()
    }
}
