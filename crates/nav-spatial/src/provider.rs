//! Provider traits consumed by the synthesizer and the reroute path.
//!
//! # Pluggability
//!
//! Every external service the engine depends on is an explicit, injected
//! trait object or generic parameter, never an ambient global.  Tests swap in
//! deterministic implementations; production code wraps an HTTP client.
//!
//! # Thread safety
//!
//! Implementations must be `Send + Sync`: reroute queries run on a blocking
//! worker thread while the session keeps processing fixes, and the avoidance
//! variants may query in parallel.

use std::sync::Arc;

use nav_core::{Point, Profile};

use crate::{RoutePath, RoutingResult};

// ── RoutingProvider ───────────────────────────────────────────────────────────

/// Road-routing service.
pub trait RoutingProvider: Send + Sync {
    /// Route through `waypoints` in order (start, optional vias, goal).
    ///
    /// Implementations must accept at least one via point so detours can be
    /// injected.
    fn route(&self, waypoints: &[Point], profile: Profile) -> RoutingResult<RoutePath>;

    /// Name for logging.
    fn name(&self) -> &str {
        "routing-provider"
    }
}

impl<T: RoutingProvider + ?Sized> RoutingProvider for Arc<T> {
    fn route(&self, waypoints: &[Point], profile: Profile) -> RoutingResult<RoutePath> {
        (**self).route(waypoints, profile)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: RoutingProvider + ?Sized> RoutingProvider for &T {
    fn route(&self, waypoints: &[Point], profile: Profile) -> RoutingResult<RoutePath> {
        (**self).route(waypoints, profile)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

// ── TransitProvider ───────────────────────────────────────────────────────────

/// Kind of one itinerary leg.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LegKind {
    Walk,
    Bus,
    Subway,
}

/// One leg of a public-transit itinerary.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitLeg {
    pub kind:       LegKind,
    pub distance_m: f64,
    pub minutes:    f64,
    /// Line label (`"2"`, `"143"`), absent for walking legs.
    pub line:       Option<String>,
    pub from_name:  Option<String>,
    pub to_name:    Option<String>,
    pub stop_count: Option<u32>,
}

/// A complete public-transit itinerary.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    pub total_minutes:  f64,
    pub fare:           f64,
    pub transfer_count: u32,
    pub legs:           Vec<TransitLeg>,
    /// Approximate geometry: start, stops passed, goal.
    pub path:           Vec<Point>,
}

impl Itinerary {
    /// Sum of leg distances in metres.
    pub fn distance_m(&self) -> f64 {
        self.legs.iter().map(|l| l.distance_m).sum()
    }
}

/// Public-transit itinerary service.
pub trait TransitProvider: Send + Sync {
    /// Itineraries from `start` to `goal`, best first.  An empty result
    /// (e.g. the endpoints are too close for transit) is not an error.
    fn find_itineraries(&self, start: Point, goal: Point) -> RoutingResult<Vec<Itinerary>>;
}

impl<T: TransitProvider + ?Sized> TransitProvider for Arc<T> {
    fn find_itineraries(&self, start: Point, goal: Point) -> RoutingResult<Vec<Itinerary>> {
        (**self).find_itineraries(start, goal)
    }
}

/// A [`TransitProvider`] that never finds anything.  Transit requests then
/// fall back to walking.
pub struct NoTransit;

impl TransitProvider for NoTransit {
    fn find_itineraries(&self, _start: Point, _goal: Point) -> RoutingResult<Vec<Itinerary>> {
        Ok(Vec::new())
    }
}

// ── EntranceFinder ────────────────────────────────────────────────────────────

/// Places lookup for highway entrances (interchanges, toll gates).
pub trait EntranceFinder: Send + Sync {
    /// Candidate entrance points within `radius_m` of `origin`.
    fn entrances_near(&self, origin: Point, radius_m: f64) -> Vec<Point>;
}

impl<T: EntranceFinder + ?Sized> EntranceFinder for Arc<T> {
    fn entrances_near(&self, origin: Point, radius_m: f64) -> Vec<Point> {
        (**self).entrances_near(origin, radius_m)
    }
}

/// An [`EntranceFinder`] that knows no entrances; no highway variant is
/// produced.
pub struct NoEntrances;

impl EntranceFinder for NoEntrances {
    fn entrances_near(&self, _origin: Point, _radius_m: f64) -> Vec<Point> {
        Vec::new()
    }
}

/// A fixed list of known entrances, filtered by radius.
#[derive(Clone, Debug, Default)]
pub struct FixedEntrances(pub Vec<Point>);

impl EntranceFinder for FixedEntrances {
    fn entrances_near(&self, origin: Point, radius_m: f64) -> Vec<Point> {
        self.0
            .iter()
            .copied()
            .filter(|p| origin.distance_m(*p) <= radius_m)
            .collect()
    }
}
