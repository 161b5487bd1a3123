//! Geographic coordinate type and geodesy helpers.
//!
//! `Point` stores WGS-84 degrees as `f64`.  Distances use the haversine
//! formula on a spherical Earth; projections onto polylines use a local
//! planar approximation scaled by `cos(lat)`, which is accurate to well under
//! a metre for the segment lengths a routing service returns.
//!
//! Every function here is total: coincident points, poles and the
//! anti-meridian produce finite, deterministic values rather than NaN.

use crate::NavError;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in degrees.
///
/// `(0, 0)` is reserved as the "no data" sentinel; see [`Point::validate`].
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `true` for the reserved `(0, 0)` "no data" value.
    #[inline]
    pub fn is_sentinel(self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }

    /// Reject the sentinel, non-finite values and out-of-range degrees.
    pub fn validate(self) -> Result<Point, NavError> {
        let in_range = self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng);
        if !in_range || self.is_sentinel() {
            return Err(NavError::InvalidCoordinate { lat: self.lat, lng: self.lng });
        }
        Ok(self)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: Point) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = wrap_degrees(other.lng - self.lng).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);
        let a = a.clamp(0.0, 1.0);

        2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Initial great-circle bearing towards `other`, in degrees `[0, 360)`.
    ///
    /// Coincident points return `0.0`.
    pub fn bearing_to(self, other: Point) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lng = wrap_degrees(other.lng - self.lng).to_radians();

        let y = d_lng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();
        if y.abs() < 1e-15 && x.abs() < 1e-15 {
            return 0.0;
        }
        normalize_bearing(y.atan2(x).to_degrees())
    }

    /// The point reached by travelling `distance_m` along the great circle
    /// leaving `self` at `bearing_deg`.
    pub fn destination(self, distance_m: f64, bearing_deg: f64) -> Point {
        let delta = distance_m / EARTH_RADIUS_M;
        let theta = bearing_deg.to_radians();
        let lat1 = self.lat.to_radians();
        let lng1 = self.lng.to_radians();

        let sin_lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos())
            .clamp(-1.0, 1.0);
        let lat2 = sin_lat2.asin();
        let lng2 = lng1
            + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * sin_lat2);

        Point::new(lat2.to_degrees(), wrap_degrees(lng2.to_degrees()))
    }

    /// Linear lat/lng blend: `t = 0` is `self`, `t = 1` is `other`.
    ///
    /// `t` is clamped to `[0, 1]`.  Longitude blends across the shorter side
    /// of the anti-meridian.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return other;
        }
        let d_lng = wrap_degrees(other.lng - self.lng);
        Point::new(
            self.lat + (other.lat - self.lat) * t,
            wrap_degrees(self.lng + d_lng * t),
        )
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

// ── Polyline helpers ──────────────────────────────────────────────────────────

/// `steps + 1` evenly spaced points from `a` to `b` (inclusive) by linear
/// lat/lng blending.  Only suitable for short spans: fallback routes and
/// animation.
pub fn interpolate_linear(a: Point, b: Point, steps: usize) -> Vec<Point> {
    if steps == 0 {
        return vec![a];
    }
    (0..=steps)
        .map(|i| a.lerp(b, i as f64 / steps as f64))
        .collect()
}

/// Total haversine length of a polyline in metres.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_m(w[1])).sum()
}

/// Result of snapping a point onto a polyline.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projection {
    /// Closest point on the polyline.
    pub point: Point,
    /// Distance from the query point to `point`, in metres.
    pub distance_m: f64,
    /// Index of the segment start vertex holding `point`.
    pub segment: usize,
    /// Distance along the polyline from its first vertex to `point`.
    pub along_m: f64,
}

/// Nearest point on `polyline` to `point`.
///
/// O(n) scan over all segments; ties keep the earliest segment.  Returns
/// `None` for an empty polyline; a single vertex is its own projection.
pub fn project_onto_polyline(point: Point, polyline: &[Point]) -> Option<Projection> {
    match polyline {
        [] => None,
        [only] => Some(Projection {
            point:      *only,
            distance_m: point.distance_m(*only),
            segment:    0,
            along_m:    0.0,
        }),
        _ => {
            let mut best: Option<Projection> = None;
            let mut cumulative = 0.0;

            for (i, seg) in polyline.windows(2).enumerate() {
                let (a, b) = (seg[0], seg[1]);
                let projected = project_onto_segment(point, a, b);
                let dist = point.distance_m(projected);

                if best.is_none_or(|prev| dist < prev.distance_m) {
                    best = Some(Projection {
                        point:      projected,
                        distance_m: dist,
                        segment:    i,
                        along_m:    cumulative + a.distance_m(projected),
                    });
                }
                cumulative += a.distance_m(b);
            }
            best
        }
    }
}

/// Clamp-projection of `p` onto segment `a → b` in a local planar frame.
fn project_onto_segment(p: Point, a: Point, b: Point) -> Point {
    let cos_lat = ((a.lat + b.lat) * 0.5).to_radians().cos().max(1e-6);

    let dx = wrap_degrees(b.lng - a.lng) * cos_lat;
    let dy = b.lat - a.lat;
    let px = wrap_degrees(p.lng - a.lng) * cos_lat;
    let py = p.lat - a.lat;

    let len_sq = dx * dx + dy * dy;
    if len_sq < 1e-20 {
        return a;
    }
    let t = ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0);
    a.lerp(b, t)
}

/// Normalise a bearing to `[0, 360)`.
#[inline]
pub fn normalize_bearing(deg: f64) -> f64 {
    let b = deg.rem_euclid(360.0);
    if b >= 360.0 { 0.0 } else { b }
}

/// Wrap a longitude (or longitude delta) to `[-180, 180)`.
#[inline]
fn wrap_degrees(deg: f64) -> f64 {
    if (-180.0..180.0).contains(&deg) {
        return deg;
    }
    (deg + 180.0).rem_euclid(360.0) - 180.0
}
