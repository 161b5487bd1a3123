//! Tuning constants for route synthesis and tracking.
//!
//! Every threshold the engine uses lives here so applications can load them
//! from a JSON/TOML file (with the `serde` feature) instead of recompiling.
//! `Default` gives the production values.

use crate::{NavError, Profile, TravelMode};

// ── TrackerConfig ─────────────────────────────────────────────────────────────

/// Map-matching, off-route and animation parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerConfig {
    /// Floor of the off-route threshold, metres.
    pub min_off_route_m: f64,

    /// The threshold grows as `speed × threshold_horizon_secs`.
    pub threshold_horizon_secs: f64,

    /// Consecutive breaches required to confirm the user left the route.
    pub debounce_count: u32,

    /// Weight of a new raw speed sample in the exponential moving average.
    pub speed_smoothing: f64,

    /// How far ahead (in seconds of travel) a reroute origin is projected.
    pub look_ahead_secs: f64,

    /// Look-ahead only applies above this speed, m/s.
    pub look_ahead_min_speed_mps: f64,

    /// A rerouted path starting farther than this from the request origin
    /// gets the origin prepended as a linear approach segment.
    pub approach_gap_m: f64,

    /// Duration of one display interpolation, milliseconds.
    pub animation_ms: u64,

    /// The session reports arrival when the matched position is this close
    /// to the end of the route.
    pub arrival_radius_m: f64,

    /// Extra distance around a congestion zone that raises a warning.
    pub congestion_buffer_m: f64,

    /// Below this display-to-target distance the heading is left unchanged.
    pub heading_min_move_m: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            min_off_route_m:          30.0,
            threshold_horizon_secs:   3.0,
            debounce_count:           3,
            speed_smoothing:          0.3,
            look_ahead_secs:          3.0,
            look_ahead_min_speed_mps: 2.0,
            approach_gap_m:           10.0,
            animation_ms:             1_000,
            arrival_radius_m:         30.0,
            congestion_buffer_m:      50.0,
            heading_min_move_m:       0.5,
        }
    }
}

// ── SynthConfig ───────────────────────────────────────────────────────────────

/// Route synthesis parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SynthConfig {
    /// Conflict detection checks every Nth path vertex.
    pub sample_stride: usize,

    /// Segments in a straight-line fallback route.
    pub fallback_steps: usize,

    /// Distance from a conflict centre to its detour anchor, metres.
    pub detour_offset_m: f64,

    /// Anchors tried per variant before settling for a path that still
    /// conflicts.
    pub detour_attempts: usize,

    /// Detection radius for the `Comfortable` variant, by profile.
    pub foot_detection_m:    f64,
    pub bicycle_detection_m: f64,
    pub car_detection_m:     f64,

    /// Detection radii for the pedestrian avoidance variants.
    pub avoid_obstacle_radius_m:   f64,
    pub avoid_congestion_radius_m: f64,
    pub avoid_both_radius_m:       f64,

    /// Highway entrance search radius around the start, metres.
    pub highway_search_radius_m: f64,

    /// Weight on `distance(start, entrance)` when scoring entrances.
    pub highway_start_weight: f64,

    /// Entrances may sit at most this much farther from the goal than the
    /// start does.
    pub highway_slack_m: f64,

    /// A highway candidate longer than `Fastest × highway_max_ratio` is
    /// discarded.
    pub highway_max_ratio: f64,

    /// Toll estimate: `floor((base + km × per_km) / 100) × 100`; a
    /// non-positive estimate is replaced by `toll_minimum`.
    pub toll_base:    f64,
    pub toll_per_km:  f64,
    pub toll_minimum: f64,

    /// Transit itineraries kept from the provider.
    pub max_transit_itineraries: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_stride:             5,
            fallback_steps:            20,
            detour_offset_m:           300.0,
            detour_attempts:           2,
            foot_detection_m:          60.0,
            bicycle_detection_m:       100.0,
            car_detection_m:           200.0,
            avoid_obstacle_radius_m:   100.0,
            avoid_congestion_radius_m: 150.0,
            avoid_both_radius_m:       150.0,
            highway_search_radius_m:   15_000.0,
            highway_start_weight:      1.8,
            highway_slack_m:           2_000.0,
            highway_max_ratio:         1.35,
            toll_base:                 900.0,
            toll_per_km:               44.3,
            toll_minimum:              1_200.0,
            max_transit_itineraries:   3,
        }
    }
}

impl SynthConfig {
    /// Detection radius used for the `Comfortable` variant in `mode`.
    pub fn detection_radius_m(&self, mode: TravelMode) -> f64 {
        match mode.profile() {
            Profile::Foot    => self.foot_detection_m,
            Profile::Bicycle => self.bicycle_detection_m,
            Profile::Car     => self.car_detection_m,
        }
    }
}

// ── NavConfig ─────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the synthesizer and tracker.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    pub tracker: TrackerConfig,
    pub synth:   SynthConfig,
}

impl NavConfig {
    /// Reject values that would stall or invert the algorithms.
    pub fn validate(&self) -> Result<(), NavError> {
        let t = &self.tracker;
        let s = &self.synth;

        if t.debounce_count == 0 {
            return Err(NavError::Config("tracker.debounce_count must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&t.speed_smoothing) {
            return Err(NavError::Config(format!(
                "tracker.speed_smoothing must be in [0, 1], got {}",
                t.speed_smoothing
            )));
        }
        if t.animation_ms == 0 {
            return Err(NavError::Config("tracker.animation_ms must be positive".into()));
        }
        if t.min_off_route_m <= 0.0 {
            return Err(NavError::Config("tracker.min_off_route_m must be positive".into()));
        }
        if s.sample_stride == 0 {
            return Err(NavError::Config("synth.sample_stride must be at least 1".into()));
        }
        if s.fallback_steps == 0 {
            return Err(NavError::Config("synth.fallback_steps must be at least 1".into()));
        }
        if s.detour_attempts == 0 {
            return Err(NavError::Config("synth.detour_attempts must be at least 1".into()));
        }
        if s.highway_max_ratio < 1.0 {
            return Err(NavError::Config(format!(
                "synth.highway_max_ratio must be >= 1.0, got {}",
                s.highway_max_ratio
            )));
        }
        Ok(())
    }
}
