//! walkthrough — end-to-end run of the navflow engine.
//!
//! Builds a 5×5 street grid, synthesizes walking and driving candidates
//! around an obstacle and a congestion zone, then replays a noisy walk along
//! the recommended route through the async session driver.  Midway the
//! walker wanders off a block, which triggers a reroute.
//!
//! Output is one JSON object per line on stdout; logs go to stderr.
//!
//! ```text
//! cargo run -p walkthrough -- [config.json]
//! ```

mod network;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use nav_core::{FixNoise, NavConfig, Point, RouteId, TravelMode};
use nav_hazard::{CongestionZone, HazardSet, Obstacle};
use nav_route::{CandidateKind, RouteCandidate, RouteSynthesizer};
use nav_runtime::{DisplayObserver, SessionDriver, init_logging, replay_fixes};
use nav_spatial::{FixedEntrances, NetworkRouter};
use nav_track::{DisplayState, Fix, NavigationSession, RerouteOutcome, RerouteRequest};

use network::{SIZE, build_grid, corner};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64 = 7;
const FIX_INTERVAL_MS: u64 = 2_000;
const STEP_M:          f64 = 3.0;   // per fix: 1.5 m/s walking pace
const GPS_ERROR_M:     f64 = 4.0;
const SPEEDUP:         f64 = 40.0;
const DETOUR_FROM_M:   f64 = 250.0; // along-route distance where the walker strays
const DETOUR_LEN_M:    f64 = 45.0;
const DETOUR_SIDE_M:   f64 = 70.0;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct JsonLines {
    frames:       usize,
    last_arrived: bool,
}

impl DisplayObserver for JsonLines {
    fn on_display(&mut self, state: &DisplayState) {
        self.frames += 1;
        if state.arrived && !self.last_arrived {
            emit(json!({ "event": "arrived", "state": state }));
        }
        self.last_arrived = state.arrived;
    }

    fn on_reroute_requested(&mut self, request: &RerouteRequest) {
        emit(json!({
            "event":      "reroute_requested",
            "generation": request.generation.0,
            "origin":     request.origin,
        }));
    }

    fn on_reroute_outcome(&mut self, outcome: RerouteOutcome) {
        let outcome = match outcome {
            RerouteOutcome::Installed(id) => json!({ "installed": id.0 }),
            RerouteOutcome::Stale { current } => json!({ "stale": current.0 }),
            RerouteOutcome::Stopped => json!("stopped"),
        };
        emit(json!({ "event": "reroute_outcome", "outcome": outcome }));
    }

    fn on_route_installed(&mut self, id: RouteId, route: &RouteCandidate) {
        emit(json!({
            "event":      "route_installed",
            "route_id":   id.0,
            "points":     route.points.len(),
            "distance_m": route.distance_m.round(),
        }));
    }
}

fn emit(value: serde_json::Value) {
    println!("{value}");
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    init_logging("info")?;

    let config = load_config(std::env::args().nth(1).as_deref())?;
    config.validate()?;

    // ── Network & hazards ─────────────────────────────────────────────────
    let (grid, ids) = build_grid();
    let start = corner(&grid, ids[0][0]);
    let goal = corner(&grid, ids[SIZE - 1][SIZE - 1]);
    let centre = corner(&grid, ids[SIZE / 2][SIZE / 2]);
    let on_ramp = corner(&grid, ids[0][SIZE / 2]);
    info!(nodes = grid.node_count(), edges = grid.edge_count(), "grid built");

    let hazards = HazardSet::new(
        vec![Obstacle::new(corner(&grid, ids[1][1]), 40.0)],
        vec![CongestionZone::from_occupancy(centre, 88.0)],
    );

    let synth = Arc::new(
        RouteSynthesizer::new(NetworkRouter::new(grid), config.synth.clone())
            .with_entrances(FixedEntrances(vec![on_ramp])),
    );

    // ── Candidates ────────────────────────────────────────────────────────
    for mode in [TravelMode::Walking, TravelMode::Driving] {
        let candidates = synth.synthesize(start, goal, &hazards, mode)?;
        for c in &candidates {
            emit(json!({
                "event":       "candidate",
                "mode":        mode.as_str(),
                "kind":        c.kind.as_str(),
                "distance_m":  c.distance_m.round(),
                "eta_minutes": (c.eta_minutes * 10.0).round() / 10.0,
                "fallback":    c.is_fallback,
                "toll_fare":   c.toll_fare,
            }));
        }
    }

    let route = synth
        .synthesize(start, goal, &hazards, TravelMode::Walking)?
        .into_iter()
        .find(|c| c.kind == CandidateKind::Recommended)
        .context("no recommended walking route")?;

    // ── Replay ────────────────────────────────────────────────────────────
    let fixes = noisy_walk(&route.points);
    info!(fixes = fixes.len(), "replaying walk");

    let session = NavigationSession::new(route, config.tracker.clone())?.with_zones(hazards.zones.clone());
    let driver = SessionDriver::new(session, Arc::clone(&synth));

    let (tx, rx) = mpsc::channel(64);
    let feeder = tokio::spawn(replay_fixes(fixes, tx, SPEEDUP));

    let mut observer = JsonLines::default();
    let summary = driver.run(rx, &mut observer, CancellationToken::new()).await?;
    feeder.await.context("replay task panicked")??;

    emit(json!({
        "event":              "summary",
        "fixes_accepted":     summary.fixes_accepted,
        "fixes_rejected":     summary.fixes_rejected,
        "frames":             observer.frames,
        "reroutes_requested": summary.reroutes_requested,
        "reroutes_installed": summary.reroutes_installed,
        "reroutes_discarded": summary.reroutes_discarded,
        "reroute_failures":   summary.reroute_failures,
        "final_route_points": summary.final_route.points.len(),
        "final_state":        summary.final_state,
    }));
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<NavConfig> {
    let Some(path) = path else {
        return Ok(NavConfig::default());
    };
    let text = std::fs::read_to_string(Path::new(path))
        .with_context(|| format!("reading config {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))
}

/// Fixes every `STEP_M` along `points`, jittered, with one sideways excursion.
fn noisy_walk(points: &[Point]) -> Vec<Fix> {
    let mut noise = FixNoise::new(SEED);
    let total = nav_core::path_length(points);
    let steps = (total / STEP_M).ceil() as u64;

    (0..=steps)
        .filter_map(|i| {
            let along = (i as f64 * STEP_M).min(total);
            let (mut p, bearing) = point_along(points, along)?;
            if (DETOUR_FROM_M..DETOUR_FROM_M + DETOUR_LEN_M).contains(&along) {
                p = p.destination(DETOUR_SIDE_M, bearing - 90.0);
            }
            Some(Fix::at(noise.jitter(p, GPS_ERROR_M), i * FIX_INTERVAL_MS))
        })
        .collect()
}

/// The point `along_m` metres into `points` and the bearing of its segment.
fn point_along(points: &[Point], along_m: f64) -> Option<(Point, f64)> {
    let mut acc = 0.0;
    for w in points.windows(2) {
        let len = w[0].distance_m(w[1]);
        if len > 0.0 && acc + len >= along_m {
            let t = (along_m - acc) / len;
            return Some((w[0].lerp(w[1], t), w[0].bearing_to(w[1])));
        }
        acc += len;
    }
    let last = *points.last()?;
    let bearing = match points {
        [.., a, b] => a.bearing_to(*b),
        _ => 0.0,
    };
    Some((last, bearing))
}
