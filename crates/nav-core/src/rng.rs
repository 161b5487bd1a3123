//! Deterministic GPS noise for recorded-trace replays and tests.
//!
//! Real receivers scatter fixes around the true position.  `FixNoise` wraps a
//! seeded `SmallRng` so a synthetic walk can be perturbed the same way on
//! every run: the same seed always yields the same sequence of offsets.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Point;

/// Seeded jitter source.
pub struct FixNoise(SmallRng);

impl FixNoise {
    pub fn new(seed: u64) -> Self {
        FixNoise(SmallRng::seed_from_u64(seed))
    }

    /// Offset `p` by a uniformly random bearing and a distance in
    /// `[0, max_error_m]`.
    pub fn jitter(&mut self, p: Point, max_error_m: f64) -> Point {
        if max_error_m <= 0.0 {
            return p;
        }
        let bearing: f64 = self.0.gen_range(0.0..360.0);
        let dist: f64 = self.0.gen_range(0.0..=max_error_m);
        p.destination(dist, bearing)
    }
}
