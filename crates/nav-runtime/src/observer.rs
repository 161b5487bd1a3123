//! Display observer trait for renderers and recorders.

use tokio::sync::mpsc;
use tracing::trace;

use nav_core::{Point, RouteId};
use nav_route::RouteCandidate;
use nav_track::{DisplayState, RerouteOutcome, RerouteRequest};

/// Callbacks invoked by [`SessionDriver::run`][crate::SessionDriver::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait DisplayObserver {
    /// A new display frame: after every accepted fix and on every animation
    /// tick that moved the marker.
    fn on_display(&mut self, _state: &DisplayState) {}

    /// The session confirmed the user left the route.
    fn on_reroute_requested(&mut self, _request: &RerouteRequest) {}

    /// A reroute result came back and was installed or discarded.
    fn on_reroute_outcome(&mut self, _outcome: RerouteOutcome) {}

    /// A new route is active; redraw the polyline.
    fn on_route_installed(&mut self, _id: RouteId, _route: &RouteCandidate) {}

    /// Called once after the session was stopped.
    fn on_stopped(&mut self, _final_state: &DisplayState) {}
}

/// A [`DisplayObserver`] that does nothing.
pub struct NoopObserver;

impl DisplayObserver for NoopObserver {}

// ── ChannelObserver ───────────────────────────────────────────────────────────

/// Everything a [`ChannelObserver`] forwards.
#[derive(Clone, Debug)]
pub enum DisplayEvent {
    Frame(DisplayState),
    RerouteRequested(RerouteRequest),
    RerouteOutcome(RerouteOutcome),
    RouteInstalled { id: RouteId, points: Vec<Point> },
    Stopped(DisplayState),
}

/// Forwards events to a bounded channel, typically read by a UI task.
///
/// Sends never wait: when the receiver lags, events are dropped and counted.
/// Frames are superseded by the next one anyway.
pub struct ChannelObserver {
    tx:      mpsc::Sender<DisplayEvent>,
    dropped: u64,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::Sender<DisplayEvent>) -> Self {
        Self { tx, dropped: 0 }
    }

    /// Events lost because the channel was full or closed.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn forward(&mut self, event: DisplayEvent) {
        if self.tx.try_send(event).is_err() {
            self.dropped += 1;
            trace!(dropped = self.dropped, "display event dropped");
        }
    }
}

impl DisplayObserver for ChannelObserver {
    fn on_display(&mut self, state: &DisplayState) {
        self.forward(DisplayEvent::Frame(state.clone()));
    }

    fn on_reroute_requested(&mut self, request: &RerouteRequest) {
        self.forward(DisplayEvent::RerouteRequested(*request));
    }

    fn on_reroute_outcome(&mut self, outcome: RerouteOutcome) {
        self.forward(DisplayEvent::RerouteOutcome(outcome));
    }

    fn on_route_installed(&mut self, id: RouteId, route: &RouteCandidate) {
        self.forward(DisplayEvent::RouteInstalled { id, points: route.points.clone() });
    }

    fn on_stopped(&mut self, final_state: &DisplayState) {
        self.forward(DisplayEvent::Stopped(final_state.clone()));
    }
}
