//! Candidate route type.

use nav_core::{Point, TravelMode, path_length};
use nav_spatial::{RoutePath, Step, TransitLeg};

/// Named category of a synthesized route.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CandidateKind {
    Recommended,
    Fastest,
    Comfortable,
    AvoidObstacle,
    AvoidCongestion,
    AvoidBoth,
    Highway,
    Transit,
}

impl CandidateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateKind::Recommended     => "recommended",
            CandidateKind::Fastest         => "fastest",
            CandidateKind::Comfortable     => "comfortable",
            CandidateKind::AvoidObstacle   => "avoid_obstacle",
            CandidateKind::AvoidCongestion => "avoid_congestion",
            CandidateKind::AvoidBoth       => "avoid_both",
            CandidateKind::Highway         => "highway",
            CandidateKind::Transit         => "transit",
        }
    }
}

impl std::fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One route offered to the user.
///
/// `points[0]` is the start and `points[last]` the goal, up to the snapping
/// tolerance of the routing provider.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteCandidate {
    /// Stable label within one synthesis result (`"fastest"`, `"transit-1"`).
    pub id:             String,
    pub kind:           CandidateKind,
    pub points:         Vec<Point>,
    pub distance_m:     f64,
    pub eta_minutes:    f64,
    pub mode:           TravelMode,
    /// Straight-line geometry produced because the provider failed.
    pub is_fallback:    bool,
    pub steps:          Vec<Step>,
    /// Transit fare.
    pub fare:           Option<f64>,
    /// Highway toll; `Some(0.0)` marks an explicitly toll-free driving route.
    pub toll_fare:      Option<f64>,
    pub transfer_count: Option<u32>,
    pub transit_legs:   Vec<TransitLeg>,
}

impl RouteCandidate {
    /// Candidate over `path`, with distance and mode-speed ETA computed from
    /// its geometry.
    pub fn from_path(kind: CandidateKind, mode: TravelMode, path: RoutePath, is_fallback: bool) -> Self {
        let distance_m = path_length(&path.points);
        Self {
            id: kind.as_str().to_owned(),
            kind,
            points: path.points,
            distance_m,
            eta_minutes: distance_m / mode.speed_m_per_min(),
            mode,
            is_fallback,
            steps: path.steps,
            fare: None,
            toll_fare: None,
            transfer_count: None,
            transit_legs: Vec::new(),
        }
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn goal(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Replace the geometry, recomputing distance and scaling the ETA.
    ///
    /// Used when the tracker prepends its origin to a rerouted path.
    pub fn set_points(&mut self, points: Vec<Point>) {
        let old = self.distance_m;
        self.points = points;
        self.distance_m = path_length(&self.points);
        self.eta_minutes = if old > 0.0 {
            self.eta_minutes * self.distance_m / old
        } else {
            self.distance_m / self.mode.speed_m_per_min()
        };
    }
}
