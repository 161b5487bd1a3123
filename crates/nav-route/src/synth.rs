//! The route synthesizer.
//!
//! # Algorithm
//!
//! 1. **Direct** query `[start, goal]` under the mode's profile.  A failure
//!    (or an unusable path) becomes a straight-line fallback of
//!    `fallback_steps` segments flagged `is_fallback`.  Cycling failures
//!    retry once under the car profile first.
//! 2. **Comfortable**: scan the direct path for the first conflict within the
//!    mode's detection radius.  If there is one, re-query through a detour
//!    anchor placed perpendicular to the path at the conflict; if the new path
//!    still conflicts, try the other side (and then further out) up to
//!    `detour_attempts` anchors.  The first conflict-free path wins, otherwise
//!    the first successful detour, otherwise the direct path.
//! 3. **Mode variants**: walking and stroll add three avoidance variants
//!    (obstacles only, congestion only, both) with their own radii; driving
//!    adds a highway variant through the best-scoring entrance, pruned when
//!    it is much longer than the direct path.
//! 4. **Transit** asks the transit provider instead; no itineraries means
//!    walking candidates, all flagged `is_fallback`.
//!
//! Output order is `Recommended, Fastest, Comfortable`, then the mode
//! variants.  Transit keeps provider order.

use nav_core::{Point, Profile, SynthConfig, TravelMode, interpolate_linear};
use nav_hazard::{HazardSet, HazardView, Side, detour_anchor, local_bearing};
use nav_spatial::maneuver::derive_steps;
use nav_spatial::{
    EntranceFinder, NoEntrances, NoTransit, RoutePath, RoutingError, RoutingProvider,
    RoutingResult, TransitProvider,
};
use tracing::{debug, warn};

use crate::highway::{best_entrance, estimate_toll, is_excessive};
use crate::transit::itinerary_candidate;
use crate::{CandidateKind, RouteCandidate, RouteResult, Rerouter};

/// A path plus whether it is a degraded straight-line stand-in.
#[derive(Clone)]
struct Leg {
    path:        RoutePath,
    is_fallback: bool,
}

/// Builds candidate routes from injected providers.
///
/// `R` answers road queries; `T` and `E` default to providers that find
/// nothing, which disables transit (falls back to walking) and the highway
/// variant respectively.
///
/// # Example
///
/// ```
/// use nav_core::{Point, SynthConfig, TravelMode};
/// use nav_hazard::HazardSet;
/// use nav_route::{CandidateKind, RouteSynthesizer};
/// use nav_spatial::StraightLineRouter;
///
/// let synth = RouteSynthesizer::new(StraightLineRouter::default(), SynthConfig::default());
/// let out = synth
///     .synthesize(
///         Point::new(37.50, 127.00),
///         Point::new(37.51, 127.01),
///         &HazardSet::default(),
///         TravelMode::Cycling,
///     )
///     .unwrap();
/// assert_eq!(out[0].kind, CandidateKind::Recommended);
/// assert!(!out[0].is_fallback);
/// ```
pub struct RouteSynthesizer<R, T = NoTransit, E = NoEntrances> {
    routing:   R,
    transit:   T,
    entrances: E,
    config:    SynthConfig,
}

impl<R: RoutingProvider> RouteSynthesizer<R> {
    pub fn new(routing: R, config: SynthConfig) -> Self {
        Self { routing, transit: NoTransit, entrances: NoEntrances, config }
    }
}

impl<R, T, E> RouteSynthesizer<R, T, E>
where
    R: RoutingProvider,
    T: TransitProvider,
    E: EntranceFinder,
{
    /// Replace the transit provider.
    pub fn with_transit<T2: TransitProvider>(self, transit: T2) -> RouteSynthesizer<R, T2, E> {
        RouteSynthesizer {
            routing:   self.routing,
            transit,
            entrances: self.entrances,
            config:    self.config,
        }
    }

    /// Replace the highway entrance finder.
    pub fn with_entrances<E2: EntranceFinder>(self, entrances: E2) -> RouteSynthesizer<R, T, E2> {
        RouteSynthesizer {
            routing:   self.routing,
            transit:   self.transit,
            entrances,
            config:    self.config,
        }
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn routing(&self) -> &R {
        &self.routing
    }

    // ── Public operations ─────────────────────────────────────────────────

    /// All candidates from `start` to `goal` for `mode`.
    ///
    /// Fails only on invalid coordinates or hazards, before any provider is
    /// queried.  Deterministic providers yield identical results for
    /// identical inputs.
    pub fn synthesize(
        &self,
        start:   Point,
        goal:    Point,
        hazards: &HazardSet,
        mode:    TravelMode,
    ) -> RouteResult<Vec<RouteCandidate>> {
        let start = start.validate()?;
        let goal = goal.validate()?;
        hazards.validate()?;

        let out = match mode {
            TravelMode::Transit => self.transit_candidates(start, goal, hazards),
            _ => self.road_candidates(start, goal, hazards, mode),
        };
        debug!(%mode, candidates = out.len(), "synthesized");
        Ok(out)
    }

    /// One `Recommended` route: direct query with straight-line fallback.
    /// Used for rerouting, where hazard variants are not needed.
    pub fn single_path(&self, origin: Point, goal: Point, mode: TravelMode) -> RouteResult<RouteCandidate> {
        let origin = origin.validate()?;
        let goal = goal.validate()?;
        let leg = self.direct(origin, goal, mode);
        Ok(RouteCandidate::from_path(CandidateKind::Recommended, mode, leg.path, leg.is_fallback))
    }

    // ── Road modes ────────────────────────────────────────────────────────

    fn road_candidates(
        &self,
        start:   Point,
        goal:    Point,
        hazards: &HazardSet,
        mode:    TravelMode,
    ) -> Vec<RouteCandidate> {
        let cfg = &self.config;
        let direct = self.direct(start, goal, mode);
        let radius_m = cfg.detection_radius_m(mode);
        let comfortable = self.avoid(start, goal, &direct, hazards.view(), radius_m, mode);

        let candidate = |kind, leg: &Leg| {
            RouteCandidate::from_path(kind, mode, leg.path.clone(), leg.is_fallback)
        };

        let mut out = vec![
            candidate(CandidateKind::Recommended, &direct),
            candidate(CandidateKind::Fastest, &direct),
            candidate(CandidateKind::Comfortable, &comfortable),
        ];

        if mode.is_pedestrian() {
            let variants = [
                (CandidateKind::AvoidObstacle, hazards.obstacles_only(), cfg.avoid_obstacle_radius_m),
                (CandidateKind::AvoidCongestion, hazards.zones_only(), cfg.avoid_congestion_radius_m),
                (CandidateKind::AvoidBoth, hazards.view(), cfg.avoid_both_radius_m),
            ];
            let run = |&(kind, view, radius): &(CandidateKind, HazardView<'_>, f64)| {
                candidate(kind, &self.avoid(start, goal, &direct, view, radius, mode))
            };

            #[cfg(not(feature = "parallel"))]
            out.extend(variants.iter().map(run));

            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;
                let built: Vec<RouteCandidate> = variants.par_iter().map(run).collect();
                out.extend(built);
            }
        }

        if mode == TravelMode::Driving {
            out[2].toll_fare = Some(0.0);
            let fastest_m = out[1].distance_m;
            if let Some(highway) = self.highway(start, goal) {
                if is_excessive(highway.distance_m, fastest_m, cfg) {
                    debug!(
                        highway_m = highway.distance_m,
                        fastest_m,
                        "highway variant pruned as too circuitous"
                    );
                } else {
                    out.push(highway);
                }
            }
        }

        out
    }

    /// Direct `[start, goal]` query, or the straight-line fallback.
    fn direct(&self, start: Point, goal: Point, mode: TravelMode) -> Leg {
        match self.query(&[start, goal], mode) {
            Ok(path) => Leg { path, is_fallback: false },
            Err(e) => {
                warn!(
                    provider = self.routing.name(),
                    error = %e,
                    %mode,
                    "direct route failed; using straight-line fallback"
                );
                Leg { path: self.fallback_path(start, goal), is_fallback: true }
            }
        }
    }

    /// Detoured alternative to `base` around the first hazard of `hazards`.
    ///
    /// A clear `base` comes back unchanged.  If every detour query fails,
    /// `base` comes back flagged `is_fallback` since it still crosses the
    /// hazard.
    fn avoid(
        &self,
        start:    Point,
        goal:     Point,
        base:     &Leg,
        hazards:  HazardView<'_>,
        radius_m: f64,
        mode:     TravelMode,
    ) -> Leg {
        let stride = self.config.sample_stride;
        let Some(conflict) = hazards.first_conflict(&base.path.points, radius_m, stride) else {
            return base.clone();
        };
        let travel = local_bearing(&base.path.points, conflict.sample_index);

        let mut first_ok: Option<RoutePath> = None;
        let mut side = Side::Right;
        for attempt in 0..self.config.detour_attempts {
            // Alternate sides; each further pair steps farther out.
            let offset = self.config.detour_offset_m * (1 + attempt / 2) as f64;
            let anchor = detour_anchor(conflict.center, travel, offset, side);
            debug!(attempt, ?side, %anchor, kind = ?conflict.kind, "trying detour");

            match self.query(&[start, anchor, goal], mode) {
                Ok(path) => {
                    if hazards.first_conflict(&path.points, radius_m, stride).is_none() {
                        return Leg { path, is_fallback: false };
                    }
                    first_ok.get_or_insert(path);
                }
                Err(e) => {
                    warn!(provider = self.routing.name(), error = %e, %mode, "detour query failed");
                }
            }
            side = side.opposite();
        }

        match first_ok {
            Some(path) => Leg { path, is_fallback: false },
            None => {
                warn!(%mode, kind = ?conflict.kind, "every detour failed; reusing direct path");
                Leg { path: base.path.clone(), is_fallback: true }
            }
        }
    }

    /// Highway variant via the best entrance, or `None`.
    fn highway(&self, start: Point, goal: Point) -> Option<RouteCandidate> {
        let cfg = &self.config;
        let entrances = self.entrances.entrances_near(start, cfg.highway_search_radius_m);
        // No entrance or a failed query drops the variant rather than
        // relabelling the fastest route as a highway.
        let entrance = best_entrance(start, goal, &entrances, cfg)?;

        let path = match self.query(&[start, entrance, goal], TravelMode::Driving) {
            Ok(path) => path,
            Err(e) => {
                warn!(provider = self.routing.name(), error = %e, "highway query failed");
                return None;
            }
        };

        let mut c = RouteCandidate::from_path(CandidateKind::Highway, TravelMode::Driving, path, false);
        c.toll_fare = Some(estimate_toll(c.distance_m, start, entrance, cfg));
        Some(c)
    }

    // ── Transit ───────────────────────────────────────────────────────────

    fn transit_candidates(&self, start: Point, goal: Point, hazards: &HazardSet) -> Vec<RouteCandidate> {
        match self.transit.find_itineraries(start, goal) {
            Ok(list) if !list.is_empty() => {
                return list
                    .into_iter()
                    .take(self.config.max_transit_itineraries)
                    .enumerate()
                    .map(|(i, it)| itinerary_candidate(i, it, start, goal))
                    .collect();
            }
            Ok(_) => debug!("no transit itineraries; falling back to walking"),
            Err(e) => warn!(error = %e, "transit provider failed; falling back to walking"),
        }

        let mut out = self.road_candidates(start, goal, hazards, TravelMode::Walking);
        for c in &mut out {
            c.is_fallback = true;
        }
        out
    }

    // ── Provider access ───────────────────────────────────────────────────

    /// Query under the mode's profile.  Cycling retries under the car
    /// profile once, since some providers lack bicycle data.
    fn query(&self, waypoints: &[Point], mode: TravelMode) -> RoutingResult<RoutePath> {
        match self.query_profile(waypoints, mode.profile()) {
            Err(e) if mode == TravelMode::Cycling => {
                debug!(error = %e, "bicycle profile failed; retrying as car");
                self.query_profile(waypoints, Profile::Car)
            }
            other => other,
        }
    }

    fn query_profile(&self, waypoints: &[Point], profile: Profile) -> RoutingResult<RoutePath> {
        let path = self.routing.route(waypoints, profile)?;
        if path.is_usable() { Ok(path) } else { Err(RoutingError::EmptyPath) }
    }

    fn fallback_path(&self, start: Point, goal: Point) -> RoutePath {
        let points = interpolate_linear(start, goal, self.config.fallback_steps);
        let steps = derive_steps(&points, &[]);
        RoutePath::new(points, steps)
    }
}

impl<R, T, E> Rerouter for RouteSynthesizer<R, T, E>
where
    R: RoutingProvider,
    T: TransitProvider,
    E: EntranceFinder,
{
    fn reroute(&self, origin: Point, goal: Point, mode: TravelMode) -> RouteResult<RouteCandidate> {
        self.single_path(origin, goal, mode)
    }
}
