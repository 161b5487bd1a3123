//! A routing provider's answer: geometry plus maneuver metadata.

use nav_core::{Point, path_length};

/// One maneuver in a route, using the OSRM vocabulary.
///
/// `maneuver_type` is e.g. `"depart"`, `"turn"`, `"new name"`, `"merge"`,
/// `"arrive"`; `modifier` is e.g. `"left"`, `"slight right"`, `"uturn"`.
/// `distance_m` is the distance travelled *after* this maneuver until the
/// next one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub maneuver_type: String,
    pub modifier:      Option<String>,
    pub distance_m:    f64,
    pub street_name:   String,
    pub location:      Point,
}

impl Step {
    pub fn new(maneuver_type: &str, modifier: Option<&str>, location: Point) -> Self {
        Self {
            maneuver_type: maneuver_type.to_owned(),
            modifier:      modifier.map(str::to_owned),
            distance_m:    0.0,
            street_name:   String::new(),
            location,
        }
    }
}

/// Ordered route geometry and its maneuvers.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePath {
    pub points: Vec<Point>,
    pub steps:  Vec<Step>,
}

impl RoutePath {
    pub fn new(points: Vec<Point>, steps: Vec<Step>) -> Self {
        Self { points, steps }
    }

    /// Geometric length in metres.
    pub fn distance_m(&self) -> f64 {
        path_length(&self.points)
    }

    /// A path the engine can use: at least two vertices.
    pub fn is_usable(&self) -> bool {
        self.points.len() >= 2
    }
}
