//! What a renderer consumes.

use nav_core::{Generation, Point, RouteId};
use nav_hazard::CongestionZone;

use crate::{Instruction, TrackState};

/// Snapshot of everything a map view draws.
///
/// Produced after every fix and every animation tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayState {
    /// Smoothly animated marker position.
    pub display_position:   Point,
    /// Marker heading in degrees, `[0, 360)`.
    pub heading:            f64,
    pub off_route:          bool,
    pub active_route_id:    RouteId,
    pub arrived:            bool,
    /// Nearest heavy congestion zone the user is in or close to.
    pub congestion_warning: Option<CongestionZone>,
    pub instruction:        Option<Instruction>,
    /// Along-route distance left, metres.
    pub remaining_m:        f64,
    /// Route ETA scaled by the fraction of the route still ahead.
    pub remaining_minutes:  f64,
    pub debug:              DebugMetrics,
}

/// Internals exposed for debugging overlays and logs.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugMetrics {
    pub raw_position:         Option<Point>,
    pub matched_position:     Option<Point>,
    pub deviation_m:          f64,
    pub threshold_m:          f64,
    pub speed_mps:            f64,
    pub consecutive_breaches: u32,
    pub state:                TrackState,
    pub generation:           Generation,
}
