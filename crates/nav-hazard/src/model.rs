//! Hazard types and the per-request snapshot.

use nav_core::Point;

use crate::{HazardError, HazardResult};

// ── Severity ──────────────────────────────────────────────────────────────────

/// Congestion level of a zone, ordered from least to most crowded.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    #[default]
    Light,
    Moderate,
    Heavy,
    Severe,
}

impl Severity {
    /// Classify an occupancy percentage (population / capacity × 100).
    ///
    /// | Occupancy   | Severity   |
    /// |-------------|------------|
    /// | > 100 %     | `Severe`   |
    /// | 76 – 100 %  | `Heavy`    |
    /// | 51 – 75 %   | `Moderate` |
    /// | ≤ 50 %      | `Light`    |
    pub fn from_occupancy(percent: f64) -> Self {
        if percent > 100.0 {
            Severity::Severe
        } else if percent >= 76.0 {
            Severity::Heavy
        } else if percent >= 51.0 {
            Severity::Moderate
        } else {
            Severity::Light
        }
    }

    /// Radius a crowd of this severity typically spills over, in metres.
    pub fn typical_radius_m(self) -> f64 {
        match self {
            Severity::Light    => 100.0,
            Severity::Moderate => 150.0,
            Severity::Heavy    => 200.0,
            Severity::Severe   => 300.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Light    => "light",
            Severity::Moderate => "moderate",
            Severity::Heavy    => "heavy",
            Severity::Severe   => "severe",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Obstacle / CongestionZone ─────────────────────────────────────────────────

/// A point hazard (construction, closure, step-free barrier).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub point:              Point,
    pub influence_radius_m: f64,
}

impl Obstacle {
    pub fn new(point: Point, influence_radius_m: f64) -> Self {
        Self { point, influence_radius_m }
    }
}

/// A crowded area with a radius and severity.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CongestionZone {
    pub point:    Point,
    pub radius_m: f64,
    pub severity: Severity,
}

impl CongestionZone {
    pub fn new(point: Point, radius_m: f64, severity: Severity) -> Self {
        Self { point, radius_m, severity }
    }

    /// Zone sized from a measured occupancy percentage.
    pub fn from_occupancy(point: Point, percent: f64) -> Self {
        let severity = Severity::from_occupancy(percent);
        Self { point, radius_m: severity.typical_radius_m(), severity }
    }
}

// ── HazardSet ─────────────────────────────────────────────────────────────────

/// Read-only snapshot of all known hazards, captured at request time.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardSet {
    pub obstacles: Vec<Obstacle>,
    pub zones:     Vec<CongestionZone>,
}

impl HazardSet {
    pub fn new(obstacles: Vec<Obstacle>, zones: Vec<CongestionZone>) -> Self {
        Self { obstacles, zones }
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty() && self.zones.is_empty()
    }

    /// Reject hazards with invalid coordinates or radii.
    pub fn validate(&self) -> HazardResult<()> {
        for o in &self.obstacles {
            o.point.validate()?;
            check_radius(o.influence_radius_m)?;
        }
        for z in &self.zones {
            z.point.validate()?;
            check_radius(z.radius_m)?;
        }
        Ok(())
    }

    /// Every hazard.
    pub fn view(&self) -> HazardView<'_> {
        HazardView { obstacles: &self.obstacles, zones: &self.zones }
    }

    /// Obstacles only; congestion is ignored.
    pub fn obstacles_only(&self) -> HazardView<'_> {
        HazardView { obstacles: &self.obstacles, zones: &[] }
    }

    /// Congestion zones only; obstacles are ignored.
    pub fn zones_only(&self) -> HazardView<'_> {
        HazardView { obstacles: &[], zones: &self.zones }
    }
}

fn check_radius(r: f64) -> HazardResult<()> {
    if r.is_finite() && r >= 0.0 { Ok(()) } else { Err(HazardError::InvalidRadius(r)) }
}

/// Borrowed subset of a [`HazardSet`].
#[derive(Copy, Clone, Debug)]
pub struct HazardView<'a> {
    pub obstacles: &'a [Obstacle],
    pub zones:     &'a [CongestionZone],
}

impl HazardView<'_> {
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty() && self.zones.is_empty()
    }

    /// [`first_conflict`](crate::first_conflict) against this view.
    pub fn first_conflict(
        &self,
        path:               &[Point],
        detection_radius_m: f64,
        stride:             usize,
    ) -> Option<crate::Conflict> {
        crate::first_conflict(path, self.obstacles, self.zones, detection_radius_m, stride)
    }
}
