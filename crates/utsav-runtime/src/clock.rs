//! Frame clock supplying elapsed time and per-frame delta

use std::time::Instant;

/// Monotonic animation time as seen by the effect core.
///
/// Every lifetime in the scene is measured against this source, never the
/// wall clock, so pausing the render surface does not age live particles.
pub trait TimeSource {
    /// Total elapsed animation time in seconds
    fn now(&self) -> f64;

    /// Time covered by the most recent tick in seconds
    fn delta(&self) -> f64;
}

/// Tracks animation time for the frame loop
pub struct GameClock {
    /// Total elapsed animation time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Upper bound for a single frame's delta
    pub max_delta: f64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
    paused: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_delta: 0.25,
            last_instant: Instant::now(),
            first_tick: true,
            paused: false,
        }
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock from the wall clock. Call once per displayed frame.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick || self.paused {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.step(elapsed);
    }

    /// Advance the clock by an explicit delta (headless runs and tests)
    pub fn advance(&mut self, dt: f64) {
        self.first_tick = false;
        if self.paused {
            self.delta_time = 0.0;
            return;
        }
        self.step(dt);
    }

    /// Stop animation time; ticks report a zero delta until `resume`
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Time spent paused never reaches the simulation.
            self.last_instant = Instant::now();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn step(&mut self, elapsed: f64) {
        // Clamp to avoid huge jumps after a stall (max 250ms frame time)
        self.delta_time = elapsed.clamp(0.0, self.max_delta);
        self.total_time += self.delta_time;
    }
}

impl TimeSource for GameClock {
    fn now(&self) -> f64 {
        self.total_time
    }

    fn delta(&self) -> f64 {
        self.delta_time
    }
}
