//! Fixed-timestep frame clock.
//!
//! The browser drives rendering at a variable rate (~60 fps); the engine
//! wants discrete, deterministic ticks. `FrameClock` accumulates wall-clock
//! deltas fed from `performance.now()` and releases whole ticks at
//! [`TICKS_PER_SEC`]. Game logic never sees timestamps, only tick counts,
//! which keeps every time-based rule testable off-browser.

/// Engine tick rate. All durations in the engine are counted in these ticks.
pub const TICKS_PER_SEC: u32 = 10;

/// Largest per-frame delta honoured, in milliseconds. A backgrounded tab can
/// deliver a multi-minute gap on resume; clamping avoids a catch-up stampede.
const MAX_FRAME_MS: f64 = 500.0;

pub struct FrameClock {
    ms_per_tick: f64,
    accumulator: f64,
    last_timestamp: Option<f64>,
    /// Total ticks released since creation.
    pub total_ticks: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            ms_per_tick: 1000.0 / TICKS_PER_SEC as f64,
            accumulator: 0.0,
            last_timestamp: None,
            total_ticks: 0,
        }
    }

    /// Feed the current wall-clock time in milliseconds; returns how many
    /// whole ticks elapsed since the previous call. The first call anchors
    /// the clock and yields zero.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

/// Whole seconds represented by a tick count, rounded up so a countdown shows
/// "0:01" until it actually hits zero.
pub fn ticks_to_secs_ceil(ticks: u64) -> u64 {
    ticks.div_ceil(TICKS_PER_SEC as u64)
}

/// Tick count for a whole number of seconds.
pub fn secs_to_ticks(secs: u64) -> u64 {
    secs * TICKS_PER_SEC as u64
}

/// Tick count for a whole number of minutes.
pub fn minutes_to_ticks(minutes: u64) -> u64 {
    secs_to_ticks(minutes * 60)
}
