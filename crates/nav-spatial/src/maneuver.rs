//! Turn classification and step derivation.
//!
//! Offline routers have no maneuver metadata of their own, so they derive
//! OSRM-style steps from the geometry: a maneuver is emitted wherever the
//! path bends by at least [`MIN_TURN_DEG`] or the street name changes.

use nav_core::Point;

use crate::Step;

/// Smallest bend reported as a turn.
pub const MIN_TURN_DEG: f64 = 30.0;

/// Vertices closer than this to a neighbour have no meaningful bearing.
const MIN_LEG_M: f64 = 0.5;

/// Signed turn angle at `b` when travelling `a → b → c`, in `(-180, 180]`.
/// Positive turns right.
pub fn turn_angle(a: Point, b: Point, c: Point) -> f64 {
    let mut angle = b.bearing_to(c) - a.bearing_to(b);
    while angle > 180.0 {
        angle -= 360.0;
    }
    while angle <= -180.0 {
        angle += 360.0;
    }
    angle
}

/// OSRM modifier for a signed turn angle.
pub fn modifier_for(angle: f64) -> &'static str {
    let abs = angle.abs();
    let right = angle > 0.0;
    if abs > 170.0 {
        "uturn"
    } else if abs > 120.0 {
        if right { "sharp right" } else { "sharp left" }
    } else if abs > 60.0 {
        if right { "right" } else { "left" }
    } else if abs > 20.0 {
        if right { "slight right" } else { "slight left" }
    } else {
        "straight"
    }
}

/// Derive maneuvers for `points`.
///
/// `streets[i]` names segment `i` (`points[i] → points[i + 1]`); missing
/// entries are unnamed.  Always emits `depart` and `arrive` for a usable
/// polyline; returns no steps for fewer than two points.
pub fn derive_steps(points: &[Point], streets: &[String]) -> Vec<Step> {
    if points.len() < 2 {
        return Vec::new();
    }
    let street = |i: usize| streets.get(i).map(String::as_str).unwrap_or("");
    let last = points.len() - 1;

    let mut along = Vec::with_capacity(points.len());
    let mut acc = 0.0;
    along.push(0.0);
    for w in points.windows(2) {
        acc += w[0].distance_m(w[1]);
        along.push(acc);
    }

    // (vertex index, maneuver type, modifier)
    let mut marks: Vec<(usize, &'static str, Option<&'static str>)> = vec![(0, "depart", None)];
    for i in 1..last {
        let (a, b, c) = (points[i - 1], points[i], points[i + 1]);
        if a.distance_m(b) < MIN_LEG_M || b.distance_m(c) < MIN_LEG_M {
            continue;
        }
        let angle = turn_angle(a, b, c);
        if angle.abs() >= MIN_TURN_DEG {
            marks.push((i, "turn", Some(modifier_for(angle))));
        } else if street(i - 1) != street(i) {
            marks.push((i, "new name", Some("straight")));
        }
    }
    marks.push((last, "arrive", None));

    marks
        .iter()
        .enumerate()
        .map(|(k, &(i, kind, modifier))| {
            let next_along = marks.get(k + 1).map_or(along[i], |&(j, _, _)| along[j]);
            let name = if i == last { street(last - 1) } else { street(i) };
            Step {
                distance_m:  next_along - along[i],
                street_name: name.to_owned(),
                ..Step::new(kind, modifier, points[i])
            }
        })
        .collect()
}
