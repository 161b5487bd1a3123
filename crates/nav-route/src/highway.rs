//! Highway variant: entrance selection and toll estimate.
//!
//! # Entrance score
//!
//! ```text
//! score(e) = highway_start_weight · d(start, e) + d(e, goal)
//! ```
//!
//! The weight (1.8 by default) favours entrances close to the start so the
//! variant actually gets onto a toll road early.  Entrances that leave the
//! driver further than `d(start, goal) + highway_slack_m` from the goal are
//! skipped outright.
//!
//! # Toll
//!
//! `floor((toll_base + km · toll_per_km) / 100) · 100`, where `km` is the
//! route length minus the straight-line approach to the entrance.  A
//! non-positive result is replaced by `toll_minimum`.

use nav_core::{Point, SynthConfig};

/// Lowest-scoring eligible entrance, or `None` if none qualifies.
///
/// Ties keep the earlier entrance.  Invalid points are ignored.
pub fn best_entrance(start: Point, goal: Point, entrances: &[Point], cfg: &SynthConfig) -> Option<Point> {
    let direct = start.distance_m(goal);

    entrances
        .iter()
        .copied()
        .filter(|e| e.validate().is_ok())
        .filter(|e| e.distance_m(goal) <= direct + cfg.highway_slack_m)
        .map(|e| (cfg.highway_start_weight * start.distance_m(e) + e.distance_m(goal), e))
        .fold(None, |best: Option<(f64, Point)>, cur| match best {
            Some(b) if b.0 <= cur.0 => Some(b),
            _ => Some(cur),
        })
        .map(|(_, e)| e)
}

/// Toll in won for a highway route of `route_m` metres entered at `entrance`.
pub fn estimate_toll(route_m: f64, start: Point, entrance: Point, cfg: &SynthConfig) -> f64 {
    let highway_km = ((route_m - start.distance_m(entrance)) / 1000.0).max(0.0);
    let rounded = ((cfg.toll_base + highway_km * cfg.toll_per_km) / 100.0).floor() * 100.0;
    if rounded > 0.0 { rounded } else { cfg.toll_minimum }
}

/// `true` if the highway variant is too long to be worth offering.
pub fn is_excessive(highway_m: f64, fastest_m: f64, cfg: &SynthConfig) -> bool {
    fastest_m > 0.0 && highway_m > fastest_m * cfg.highway_max_ratio
}
