//! Off-route state and the pure formulas behind each transition.

use nav_core::{Point, TrackerConfig};

/// Where the session stands relative to its active route.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackState {
    #[default]
    OnRoute,
    /// Deviation exceeded the threshold this many times in a row, but not
    /// yet often enough to act.
    OffRoutePending(u32),
    /// Deviation confirmed; a reroute has been requested.  Lasts until the
    /// next fix or an installed reroute.
    OffRouteConfirmed,
}

/// Off-route threshold for the smoothed speed: `max(floor, speed × horizon)`.
///
/// A fast user covers more ground between fixes, so GPS lag alone can put
/// them tens of metres off the polyline.
#[inline]
pub fn dynamic_threshold(speed_mps: f64, cfg: &TrackerConfig) -> f64 {
    cfg.min_off_route_m.max(speed_mps * cfg.threshold_horizon_secs)
}

/// Exponential moving average of speed.  `alpha` weighs the new sample.
#[inline]
pub fn smooth_speed(previous: f64, raw: f64, alpha: f64) -> f64 {
    ((1.0 - alpha) * previous + alpha * raw).max(0.0)
}

/// Origin for a reroute request.
///
/// Above `look_ahead_min_speed_mps` the origin is projected
/// `speed × look_ahead_secs` metres along `heading_deg`, so the new route
/// starts where the user will be when it arrives rather than behind them.
pub fn look_ahead_origin(current: Point, speed_mps: f64, heading_deg: f64, cfg: &TrackerConfig) -> Point {
    if speed_mps > cfg.look_ahead_min_speed_mps {
        current.destination(speed_mps * cfg.look_ahead_secs, heading_deg)
    } else {
        current
    }
}
