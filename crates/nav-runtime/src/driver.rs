//! The session task.
//!
//! One task owns the [`NavigationSession`] and multiplexes its inputs with a
//! `biased` `select!`, in priority order:
//!
//! 1. shutdown token
//! 2. reroute results (so a fresh route is installed before the next fix is
//!    matched against the old one)
//! 3. incoming fixes
//! 4. the animation ticker
//!
//! Reroutes run on the blocking pool because providers are synchronous.  Each
//! result is sent back tagged with the generation it was requested under; the
//! session decides whether it is still current.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use nav_core::{Generation, Point};
use nav_route::{RouteCandidate, Rerouter};
use nav_track::{DisplayState, Fix, NavigationSession, RerouteOutcome, RerouteRequest, TrackError};

use crate::{DisplayObserver, RuntimeError, RuntimeResult};

/// Default animation tick, roughly 60 Hz.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Reroute results buffered between the blocking pool and the session task.
const REPLY_CAPACITY: usize = 4;

struct RerouteReply {
    generation: Generation,
    result:     RuntimeResult<RouteCandidate>,
}

/// Counters and final state returned by [`SessionDriver::run`].
#[derive(Clone, Debug)]
pub struct DriverSummary {
    pub fixes_accepted:     usize,
    pub fixes_rejected:     usize,
    pub frames:             usize,
    pub reroutes_requested: usize,
    pub reroutes_installed: usize,
    pub reroutes_discarded: usize,
    pub reroute_failures:   usize,
    pub final_state:        DisplayState,
    pub final_route:        RouteCandidate,
}

/// Runs one [`NavigationSession`] against live inputs.
pub struct SessionDriver<R> {
    session:       NavigationSession,
    rerouter:      Arc<R>,
    tick_interval: Duration,
}

impl<R: Rerouter + 'static> SessionDriver<R> {
    pub fn new(session: NavigationSession, rerouter: Arc<R>) -> Self {
        Self { session, rerouter, tick_interval: DEFAULT_TICK_INTERVAL }
    }

    /// Sets a custom animation tick interval.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn session(&self) -> &NavigationSession {
        &self.session
    }

    /// Drive the session until `shutdown` is cancelled or the fix source
    /// closes.
    ///
    /// When the fix source closes while a reroute is in flight, the driver
    /// waits for that result before stopping.  Invalid fixes are logged and
    /// skipped.  The session is always stopped on return, so late reroute
    /// results are discarded.
    ///
    /// # Errors
    ///
    /// Only session invariant violations are returned; provider failures are
    /// counted in the summary.
    pub async fn run<O: DisplayObserver>(
        mut self,
        mut fixes: mpsc::Receiver<Fix>,
        observer:  &mut O,
        shutdown:  CancellationToken,
    ) -> RuntimeResult<DriverSummary> {
        let epoch = Instant::now();
        let now_ms = || epoch.elapsed().as_millis() as u64;

        let (reply_tx, mut replies) = mpsc::channel::<RerouteReply>(REPLY_CAPACITY);
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut counts = Counts::default();
        let mut in_flight: Option<Generation> = None;
        let mut fixes_open = true;
        let mut last_frame: Option<Point> = None;

        info!(
            route = %self.session.active_route_id(),
            tick_ms = self.tick_interval.as_millis() as u64,
            "session driver starting"
        );

        loop {
            if !fixes_open && in_flight.is_none() {
                break;
            }

            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("session driver shutting down");
                    break;
                }

                Some(reply) = replies.recv() => {
                    if in_flight == Some(reply.generation) {
                        in_flight = None;
                    }
                    self.apply_reply(reply, observer, &mut counts)?;
                }

                fix = fixes.recv(), if fixes_open => match fix {
                    Some(fix) => {
                        let now = now_ms();
                        match self.session.on_fix(fix, now) {
                            Ok(out) => {
                                counts.fixes_accepted += 1;
                                counts.frames += 1;
                                last_frame = Some(out.display.display_position);
                                observer.on_display(&out.display);
                                if let Some(req) = out.reroute {
                                    counts.reroutes_requested += 1;
                                    in_flight = Some(req.generation);
                                    observer.on_reroute_requested(&req);
                                    self.dispatch(req, reply_tx.clone());
                                }
                            }
                            Err(TrackError::InvalidFix(e)) => {
                                counts.fixes_rejected += 1;
                                warn!(error = %e, "fix rejected");
                            }
                            Err(e) => return Err(e.into()),
                        }
                    }
                    None => {
                        debug!(in_flight = in_flight.is_some(), "fix source closed");
                        fixes_open = false;
                    }
                },

                _ = ticker.tick() => {
                    if let Some(state) = self.session.on_animation_tick(now_ms()) {
                        if last_frame != Some(state.display_position) {
                            last_frame = Some(state.display_position);
                            counts.frames += 1;
                            observer.on_display(&state);
                        }
                    }
                }
            }
        }

        self.session.stop(now_ms());
        let final_state = self.session.display_state();
        observer.on_stopped(&final_state);
        info!(
            fixes = counts.fixes_accepted,
            reroutes = counts.reroutes_installed,
            arrived = final_state.arrived,
            "session driver stopped"
        );

        Ok(DriverSummary {
            fixes_accepted:     counts.fixes_accepted,
            fixes_rejected:     counts.fixes_rejected,
            frames:             counts.frames,
            reroutes_requested: counts.reroutes_requested,
            reroutes_installed: counts.reroutes_installed,
            reroutes_discarded: counts.reroutes_discarded,
            reroute_failures:   counts.reroute_failures,
            final_state,
            final_route:        self.session.active_route().clone(),
        })
    }

    fn dispatch(&self, req: RerouteRequest, tx: mpsc::Sender<RerouteReply>) {
        let rerouter = Arc::clone(&self.rerouter);
        tokio::spawn(async move {
            let job = tokio::task::spawn_blocking(move || {
                rerouter.reroute(req.origin, req.destination, req.mode)
            });
            let result = match job.await {
                Ok(r) => r.map_err(RuntimeError::from),
                Err(e) => Err(RuntimeError::Task(e.to_string())),
            };
            // The driver may already be gone; the result is then moot.
            let _ = tx.send(RerouteReply { generation: req.generation, result }).await;
        });
    }

    fn apply_reply<O: DisplayObserver>(
        &mut self,
        reply:    RerouteReply,
        observer: &mut O,
        counts:   &mut Counts,
    ) -> RuntimeResult<()> {
        let candidate = match reply.result {
            Ok(c) => c,
            Err(e) => {
                counts.reroute_failures += 1;
                warn!(generation = %reply.generation, error = %e, "reroute failed; staying off route");
                return Ok(());
            }
        };
        let outcome = self.session.on_reroute_result(reply.generation, candidate)?;
        observer.on_reroute_outcome(outcome);
        match outcome {
            RerouteOutcome::Installed(id) => {
                counts.reroutes_installed += 1;
                observer.on_route_installed(id, self.session.active_route());
                counts.frames += 1;
                observer.on_display(&self.session.display_state());
            }
            RerouteOutcome::Stale { .. } | RerouteOutcome::Stopped => {
                counts.reroutes_discarded += 1;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct Counts {
    fixes_accepted:     usize,
    fixes_rejected:     usize,
    frames:             usize,
    reroutes_requested: usize,
    reroutes_installed: usize,
    reroutes_discarded: usize,
    reroute_failures:   usize,
}
