//! Mapping provider itineraries onto candidates.

use nav_core::{Point, TravelMode, path_length};
use nav_spatial::Itinerary;
use nav_spatial::maneuver::derive_steps;

use crate::{CandidateKind, RouteCandidate};

/// Endpoints closer than this to the provider geometry are not re-added.
const JOIN_TOLERANCE_M: f64 = 1.0;

/// Candidate for the `index`-th itinerary between `start` and `goal`.
///
/// Provider geometry is often coarse (stops only), so `start` and `goal` are
/// attached when missing.  ETA, fare and transfers come from the provider;
/// distance is the sum of leg distances when reported, else the geometry
/// length.
pub fn itinerary_candidate(index: usize, itinerary: Itinerary, start: Point, goal: Point) -> RouteCandidate {
    let mut points = Vec::with_capacity(itinerary.path.len() + 2);
    if itinerary.path.first().is_none_or(|p| p.distance_m(start) > JOIN_TOLERANCE_M) {
        points.push(start);
    }
    points.extend(itinerary.path.iter().copied());
    if points.last().is_none_or(|p| p.distance_m(goal) > JOIN_TOLERANCE_M) {
        points.push(goal);
    }

    let legs_m = itinerary.distance_m();
    let distance_m = if legs_m > 0.0 { legs_m } else { path_length(&points) };
    let steps = derive_steps(&points, &[]);

    RouteCandidate {
        id:             format!("transit-{index}"),
        kind:           CandidateKind::Transit,
        points,
        distance_m,
        eta_minutes:    itinerary.total_minutes,
        mode:           TravelMode::Transit,
        is_fallback:    false,
        steps,
        fare:           Some(itinerary.fare),
        toll_fare:      None,
        transfer_count: Some(itinerary.transfer_count),
        transit_legs:   itinerary.legs,
    }
}
