//! The single-path interface used when a session goes off route.

use std::sync::Arc;

use nav_core::{Point, TravelMode};

use crate::{RouteCandidate, RouteResult};

/// Computes one replacement route.  Implemented by
/// [`RouteSynthesizer`](crate::RouteSynthesizer); tests and runtimes may
/// supply their own.
pub trait Rerouter: Send + Sync {
    fn reroute(&self, origin: Point, goal: Point, mode: TravelMode) -> RouteResult<RouteCandidate>;
}

impl<T: Rerouter + ?Sized> Rerouter for Arc<T> {
    fn reroute(&self, origin: Point, goal: Point, mode: TravelMode) -> RouteResult<RouteCandidate> {
        (**self).reroute(origin, goal, mode)
    }
}
