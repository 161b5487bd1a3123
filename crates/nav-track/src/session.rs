//! The navigation session state machine.

use nav_core::geo::normalize_bearing;
use nav_core::{Generation, Point, RouteId, TrackerConfig, TravelMode, project_onto_polyline};
use nav_hazard::{CongestionZone, Severity, congestion_warning};
use nav_route::RouteCandidate;
use tracing::{debug, info};

use crate::state::{dynamic_threshold, look_ahead_origin, smooth_speed};
use crate::{
    Animator, DebugMetrics, DisplayState, Fix, Guidance, Instruction, TrackError, TrackResult,
    TrackState,
};

// ── Transition results ────────────────────────────────────────────────────────

/// A replacement route the caller should compute and hand back through
/// [`NavigationSession::on_reroute_result`] with the same `generation`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RerouteRequest {
    pub generation:  Generation,
    pub origin:      Point,
    pub destination: Point,
    pub mode:        TravelMode,
}

/// Result of [`NavigationSession::on_fix`].
#[derive(Clone, Debug)]
pub struct FixOutcome {
    pub display: DisplayState,
    pub reroute: Option<RerouteRequest>,
}

/// Result of [`NavigationSession::on_reroute_result`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RerouteOutcome {
    /// The route was installed under this id.
    Installed(RouteId),
    /// A newer request (or a route switch) superseded this one.
    Stale { current: Generation },
    /// The session was stopped; the result was dropped.
    Stopped,
}

// ── NavigationSession ─────────────────────────────────────────────────────────

struct ActiveRoute {
    id:        RouteId,
    candidate: RouteCandidate,
    guidance:  Guidance,
}

/// One user following one route.
///
/// All inputs arrive through `on_fix`, `on_animation_tick`,
/// `on_reroute_result`, `replace_route` and `stop`; the session never blocks
/// and never calls out.
pub struct NavigationSession {
    config:      TrackerConfig,
    destination: Point,
    mode:        TravelMode,
    zones:       Vec<CongestionZone>,

    route:         ActiveRoute,
    last_route_id: RouteId,
    generation:    Generation,
    pending:       Option<RerouteRequest>,

    state:                TrackState,
    consecutive_breaches: u32,
    off_route:            bool,
    arrived:              bool,
    stopped:              bool,

    last_fix:         Option<Fix>,
    speed_mps:        f64,
    raw_position:     Option<Point>,
    matched_position: Option<Point>,
    along_m:          f64,
    deviation_m:      f64,
    threshold_m:      f64,

    heading:     f64,
    display:     Option<Point>,
    animator:    Animator,
    instruction: Option<Instruction>,
}

impl NavigationSession {
    /// Start following `route`.  The destination is its last point.
    pub fn new(route: RouteCandidate, config: TrackerConfig) -> TrackResult<Self> {
        let destination = route.goal().ok_or(TrackError::EmptyRoute)?;
        let start = route.start().ok_or(TrackError::EmptyRoute)?;
        let threshold_m = config.min_off_route_m;
        let guidance = Guidance::new(&route.points, &route.steps);
        let first_id = RouteId::ZERO.next();

        Ok(Self {
            config,
            destination,
            mode: route.mode,
            zones: Vec::new(),

            route: ActiveRoute { id: first_id, candidate: route, guidance },
            last_route_id: first_id,
            generation: Generation::ZERO,
            pending: None,

            state: TrackState::OnRoute,
            consecutive_breaches: 0,
            off_route: false,
            arrived: false,
            stopped: false,

            last_fix: None,
            speed_mps: 0.0,
            raw_position: None,
            matched_position: None,
            along_m: 0.0,
            deviation_m: 0.0,
            threshold_m,

            heading: 0.0,
            display: None,
            animator: Animator::idle(start),
            instruction: None,
        })
    }

    /// Congestion zones checked for proximity warnings.
    #[must_use]
    pub fn with_zones(mut self, zones: Vec<CongestionZone>) -> Self {
        self.zones = zones;
        self
    }

    pub fn set_zones(&mut self, zones: Vec<CongestionZone>) {
        self.zones = zones;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &TrackerConfig { &self.config }
    pub fn state(&self) -> TrackState { self.state }
    pub fn generation(&self) -> Generation { self.generation }
    pub fn speed_mps(&self) -> f64 { self.speed_mps }
    pub fn heading(&self) -> f64 { self.heading }
    pub fn is_off_route(&self) -> bool { self.off_route }
    pub fn is_stopped(&self) -> bool { self.stopped }
    pub fn has_arrived(&self) -> bool { self.arrived }
    pub fn consecutive_breaches(&self) -> u32 { self.consecutive_breaches }
    pub fn raw_position(&self) -> Option<Point> { self.raw_position }
    pub fn matched_position(&self) -> Option<Point> { self.matched_position }
    pub fn display_position(&self) -> Option<Point> { self.display }
    pub fn active_route_id(&self) -> RouteId { self.route.id }
    pub fn active_route(&self) -> &RouteCandidate { &self.route.candidate }
    pub fn destination(&self) -> Point { self.destination }

    /// The reroute awaiting a result, if any.
    pub fn pending_reroute(&self) -> Option<&RerouteRequest> {
        self.pending.as_ref()
    }

    /// Where the animation is heading.
    pub fn target(&self) -> Point {
        self.animator.target()
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Process one position report received at `now_ms`.
    ///
    /// # Errors
    ///
    /// [`TrackError::Stopped`] after [`stop`](Self::stop);
    /// [`TrackError::InvalidFix`] for sentinel or out-of-range positions.
    pub fn on_fix(&mut self, fix: Fix, now_ms: u64) -> TrackResult<FixOutcome> {
        if self.stopped {
            return Err(TrackError::Stopped);
        }
        let pos = fix.position.validate()?;
        let hint = fix.heading_hint.filter(|h| h.is_finite()).map(normalize_bearing);

        // ── Speed ──────────────────────────────────────────────────────
        match self.last_fix {
            Some(prev) if fix.timestamp_ms > prev.timestamp_ms => {
                let dt_s = (fix.timestamp_ms - prev.timestamp_ms) as f64 / 1000.0;
                let raw = prev.position.distance_m(pos) / dt_s;
                self.speed_mps = smooth_speed(self.speed_mps, raw, self.config.speed_smoothing);
                self.last_fix = Some(fix);
            }
            Some(prev) => {
                debug!(prev_ms = prev.timestamp_ms, ts_ms = fix.timestamp_ms, "non-increasing timestamp; speed kept");
            }
            None => self.last_fix = Some(fix),
        }
        self.raw_position = Some(pos);

        // ── Map matching ───────────────────────────────────────────────
        let matched = self.match_position(pos)?;
        self.threshold_m = dynamic_threshold(self.speed_mps, &self.config);

        // ── Off-route debounce ─────────────────────────────────────────
        let mut reroute = None;
        let target = if self.deviation_m > self.threshold_m {
            self.consecutive_breaches += 1;
            if self.consecutive_breaches >= self.config.debounce_count {
                self.consecutive_breaches = 0;
                self.off_route = true;
                self.state = TrackState::OffRouteConfirmed;
                reroute = Some(self.request_reroute(pos, hint.unwrap_or(self.heading)));
                pos
            } else {
                self.state = TrackState::OffRoutePending(self.consecutive_breaches);
                debug!(
                    breaches = self.consecutive_breaches,
                    deviation_m = self.deviation_m,
                    threshold_m = self.threshold_m,
                    "off-route breach"
                );
                // Once confirmed, keep following the raw fix until a new
                // route is installed.
                if self.off_route { pos } else { matched }
            }
        } else {
            if self.off_route {
                info!(deviation_m = self.deviation_m, "back on route");
            }
            self.consecutive_breaches = 0;
            self.off_route = false;
            self.state = TrackState::OnRoute;
            matched
        };

        // ── Arrival ────────────────────────────────────────────────────
        if !self.arrived && !self.off_route && self.remaining_m() <= self.config.arrival_radius_m {
            self.arrived = true;
            info!(route = %self.route.id, "arrived");
        }

        // ── Heading & animation ────────────────────────────────────────
        let display_now = match self.display {
            Some(_) => self.animator.sample(now_ms),
            None => target,
        };
        self.heading = match hint {
            Some(h) => h,
            None if display_now.distance_m(target) >= self.config.heading_min_move_m => {
                display_now.bearing_to(target)
            }
            None => self.heading,
        };
        if self.display.is_none() {
            self.animator = Animator::idle(target);
        } else {
            self.animator.start(display_now, target, now_ms, self.config.animation_ms);
        }
        self.display = Some(display_now);

        Ok(FixOutcome { display: self.display_state(), reroute })
    }

    /// Advance the display animation to `now_ms`.
    ///
    /// `None` before the first fix and after [`stop`](Self::stop).
    pub fn on_animation_tick(&mut self, now_ms: u64) -> Option<DisplayState> {
        if self.stopped || self.display.is_none() {
            return None;
        }
        self.display = Some(self.animator.tick(now_ms));
        Some(self.display_state())
    }

    /// Apply a reroute result computed for `generation`.
    ///
    /// Results for any generation other than the current one are dropped,
    /// as is everything after [`stop`](Self::stop).  When the new path
    /// starts more than `approach_gap_m` from the request origin, the origin
    /// is prepended so the drawn route reaches the user.
    pub fn on_reroute_result(
        &mut self,
        generation: Generation,
        candidate:  RouteCandidate,
    ) -> TrackResult<RerouteOutcome> {
        if self.stopped {
            debug!(%generation, "reroute result after stop; dropped");
            return Ok(RerouteOutcome::Stopped);
        }
        if generation != self.generation {
            debug!(%generation, current = %self.generation, "stale reroute result; dropped");
            return Ok(RerouteOutcome::Stale { current: self.generation });
        }
        let first = candidate.start().ok_or(TrackError::EmptyRoute)?;

        let mut candidate = candidate;
        if let Some(req) = self.pending.take() {
            if req.origin.distance_m(first) > self.config.approach_gap_m {
                let mut points = Vec::with_capacity(candidate.points.len() + 1);
                points.push(req.origin);
                points.extend(candidate.points.iter().copied());
                candidate.set_points(points);
            }
        }

        let id = self.install(candidate);
        info!(route = %id, %generation, "reroute installed");
        Ok(RerouteOutcome::Installed(id))
    }

    /// Switch to a different route chosen by the user.  Any reroute in
    /// flight is invalidated.
    pub fn replace_route(&mut self, candidate: RouteCandidate) -> TrackResult<RouteId> {
        if self.stopped {
            return Err(TrackError::Stopped);
        }
        if candidate.points.is_empty() {
            return Err(TrackError::EmptyRoute);
        }
        self.generation = self.generation.next();
        self.pending = None;
        self.destination = candidate.goal().unwrap_or(self.destination);
        self.mode = candidate.mode;
        Ok(self.install(candidate))
    }

    /// End the session.  The animation freezes where it is at `now_ms`, the
    /// generation advances so in-flight reroutes are ignored, and further
    /// fixes are rejected.
    pub fn stop(&mut self, now_ms: u64) {
        if self.stopped {
            return;
        }
        self.animator.cancel(now_ms);
        if self.display.is_some() {
            self.display = Some(self.animator.target());
        }
        self.generation = self.generation.next();
        self.pending = None;
        self.stopped = true;
        info!(route = %self.route.id, "navigation stopped");
    }

    // ── Derived values ────────────────────────────────────────────────────

    /// Along-route distance from the matched position to the route end.
    pub fn remaining_m(&self) -> f64 {
        (self.route.guidance.total_m() - self.along_m).max(0.0)
    }

    /// Route ETA scaled by the share of the route still ahead.
    pub fn remaining_minutes(&self) -> f64 {
        let total = self.route.guidance.total_m();
        if total <= 0.0 {
            return 0.0;
        }
        let progress = (self.along_m / total).clamp(0.0, 1.0);
        self.route.candidate.eta_minutes * (1.0 - progress)
    }

    /// Current renderer snapshot.
    pub fn display_state(&self) -> DisplayState {
        let warning = self.raw_position.and_then(|p| {
            congestion_warning(p, &self.zones, self.config.congestion_buffer_m, Severity::Heavy).copied()
        });

        DisplayState {
            display_position:   self.display.unwrap_or_else(|| self.animator.target()),
            heading:            self.heading,
            off_route:          self.off_route,
            active_route_id:    self.route.id,
            arrived:            self.arrived,
            congestion_warning: warning,
            instruction:        self.instruction.clone(),
            remaining_m:        self.remaining_m(),
            remaining_minutes:  self.remaining_minutes(),
            debug: DebugMetrics {
                raw_position:         self.raw_position,
                matched_position:     self.matched_position,
                deviation_m:          self.deviation_m,
                threshold_m:          self.threshold_m,
                speed_mps:            self.speed_mps,
                consecutive_breaches: self.consecutive_breaches,
                state:                self.state,
                generation:           self.generation,
            },
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Project `pos` onto the active route and refresh the instruction.
    fn match_position(&mut self, pos: Point) -> TrackResult<Point> {
        let proj = project_onto_polyline(pos, &self.route.candidate.points).ok_or(TrackError::EmptyRoute)?;
        self.matched_position = Some(proj.point);
        self.along_m = proj.along_m;
        self.deviation_m = proj.distance_m;
        self.instruction = Some(self.route.guidance.instruction(self.along_m));
        Ok(proj.point)
    }

    fn request_reroute(&mut self, pos: Point, heading: f64) -> RerouteRequest {
        self.generation = self.generation.next();
        let origin = look_ahead_origin(pos, self.speed_mps, heading, &self.config);
        let req = RerouteRequest {
            generation:  self.generation,
            origin,
            destination: self.destination,
            mode:        self.mode,
        };
        info!(
            generation = %req.generation,
            %origin,
            speed_mps = self.speed_mps,
            deviation_m = self.deviation_m,
            "off route confirmed; requesting reroute"
        );
        self.pending = Some(req);
        req
    }

    fn install(&mut self, candidate: RouteCandidate) -> RouteId {
        let id = self.last_route_id.next();
        self.last_route_id = id;
        let guidance = Guidance::new(&candidate.points, &candidate.steps);
        self.route = ActiveRoute { id, candidate, guidance };

        self.off_route = false;
        self.consecutive_breaches = 0;
        self.state = TrackState::OnRoute;
        self.arrived = false;

        if let Some(pos) = self.raw_position {
            // Non-empty by construction; a failure leaves the old match.
            let _ = self.match_position(pos);
        }
        id
    }
}
