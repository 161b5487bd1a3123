//! Conflict detection along a path and detour anchor placement.
//!
//! Detection is a sampled scan: testing every vertex of a dense provider path
//! against every hazard is wasteful when vertices are metres apart, so only
//! every `stride`-th vertex (plus the last) is tested.

use nav_core::Point;
use nav_core::geo::normalize_bearing;
use tracing::debug;

use crate::{CongestionZone, Obstacle};

/// Which kind of hazard a path ran into.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConflictKind {
    Obstacle,
    Congestion,
}

/// The first hazard a path passes too close to.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conflict {
    /// Centre of the offending hazard.
    pub center:       Point,
    /// Index of the path vertex that triggered the hit.
    pub sample_index: usize,
    pub kind:         ConflictKind,
    /// Index into the obstacle or zone slice, per `kind`.
    pub hazard_index: usize,
}

/// Side of the path to place a detour anchor on, relative to travel direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left  => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// First sampled point of `path` within range of a hazard.
///
/// Samples indices `0, stride, 2·stride, …` and always the final point.  At
/// each sample, obstacles are tested first (`d < detection_radius_m`), then
/// zones (`d < detection_radius_m + zone.radius_m`).  A `stride` of 0 is
/// treated as 1.
pub fn first_conflict(
    path:               &[Point],
    obstacles:          &[Obstacle],
    zones:              &[CongestionZone],
    detection_radius_m: f64,
    stride:             usize,
) -> Option<Conflict> {
    if path.is_empty() || (obstacles.is_empty() && zones.is_empty()) {
        return None;
    }
    let last = path.len() - 1;
    let stride = stride.max(1);

    let samples = (0..=last).step_by(stride).chain((last % stride != 0).then_some(last));
    for i in samples {
        let p = path[i];

        if let Some(k) = obstacles.iter().position(|o| p.distance_m(o.point) < detection_radius_m) {
            debug!(sample = i, center = %obstacles[k].point, "path hits obstacle");
            return Some(Conflict {
                center:       obstacles[k].point,
                sample_index: i,
                kind:         ConflictKind::Obstacle,
                hazard_index: k,
            });
        }

        if let Some(k) = zones
            .iter()
            .position(|z| p.distance_m(z.point) < detection_radius_m + z.radius_m)
        {
            debug!(sample = i, center = %zones[k].point, "path enters congestion zone");
            return Some(Conflict {
                center:       zones[k].point,
                sample_index: i,
                kind:         ConflictKind::Congestion,
                hazard_index: k,
            });
        }
    }
    None
}

/// Direction of travel around vertex `index` of `path`, in degrees.
///
/// Uses the chord between the neighbouring vertices so a single noisy vertex
/// does not dominate.  Returns `0.0` for paths with fewer than two distinct
/// points.
pub fn local_bearing(path: &[Point], index: usize) -> f64 {
    if path.len() < 2 {
        return 0.0;
    }
    let index = index.min(path.len() - 1);
    let before = path[index.saturating_sub(1)];
    let after = path[(index + 1).min(path.len() - 1)];
    if before == after {
        return path[0].bearing_to(path[path.len() - 1]);
    }
    before.bearing_to(after)
}

/// A via point `offset_m` from `center`, perpendicular to `travel_bearing`.
///
/// The anchor only steers the provider; the resulting path is not guaranteed
/// to clear the hazard and must be re-checked.
pub fn detour_anchor(center: Point, travel_bearing: f64, offset_m: f64, side: Side) -> Point {
    let turn = match side {
        Side::Left  => -90.0,
        Side::Right => 90.0,
    };
    center.destination(offset_m, normalize_bearing(travel_bearing + turn))
}
