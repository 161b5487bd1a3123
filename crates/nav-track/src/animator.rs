//! Time-based display interpolation.
//!
//! The animator holds one linear segment `from → to` with a start time and
//! duration.  Sampling is a pure function of `now_ms`, so the caller can tick
//! at any rate; a late tick simply lands further along (or on the target).

use nav_core::Point;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Animator {
    from:        Point,
    to:          Point,
    start_ms:    u64,
    duration_ms: u64,
    running:     bool,
}

impl Animator {
    /// A settled animator resting at `at`.
    pub fn idle(at: Point) -> Self {
        Self { from: at, to: at, start_ms: 0, duration_ms: 0, running: false }
    }

    /// Begin a new segment from `from` (normally the current sample) to `to`.
    pub fn start(&mut self, from: Point, to: Point, now_ms: u64, duration_ms: u64) {
        self.from = from;
        self.to = to;
        self.start_ms = now_ms;
        self.duration_ms = duration_ms;
        self.running = true;
    }

    /// Position at `now_ms`.  Exactly `to` once `duration_ms` has elapsed.
    pub fn sample(&self, now_ms: u64) -> Point {
        if !self.running || self.duration_ms == 0 {
            return self.to;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if elapsed >= self.duration_ms {
            return self.to;
        }
        self.from.lerp(self.to, elapsed as f64 / self.duration_ms as f64)
    }

    /// Advance to `now_ms`; returns the sampled position and marks the
    /// animator settled once the target is reached.
    pub fn tick(&mut self, now_ms: u64) -> Point {
        let p = self.sample(now_ms);
        if self.running && now_ms.saturating_sub(self.start_ms) >= self.duration_ms {
            self.running = false;
        }
        p
    }

    /// Freeze wherever the animation is at `now_ms`.
    pub fn cancel(&mut self, now_ms: u64) {
        let here = self.sample(now_ms);
        *self = Self::idle(here);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn target(&self) -> Point {
        self.to
    }
}
