//! Offline [`RoutingProvider`] implementations.
//!
//! | Router               | Geometry                                         |
//! |----------------------|--------------------------------------------------|
//! | [`NetworkRouter`]    | Dijkstra over a [`RoadNetwork`], waypoints snapped to the nearest node |
//! | [`StraightLineRouter`] | Densified great-circle-ish legs between waypoints |
//!
//! Both derive maneuver steps from their geometry via
//! [`derive_steps`](crate::maneuver::derive_steps).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use nav_core::{EdgeId, NodeId, Point, Profile, interpolate_linear};
use tracing::debug;

use crate::maneuver::derive_steps;
use crate::network::RoadNetwork;
use crate::{RoutePath, RoutingError, RoutingProvider, RoutingResult};

fn validate_waypoints(waypoints: &[Point]) -> RoutingResult<()> {
    if waypoints.len() < 2 {
        return Err(RoutingError::TooFewWaypoints(waypoints.len()));
    }
    for p in waypoints {
        p.validate()?;
    }
    Ok(())
}

// ── NetworkRouter ─────────────────────────────────────────────────────────────

/// Standard Dijkstra over the CSR road graph.
///
/// Edge cost depends on the profile:
///
/// | Profile | Cost                         |
/// |---------|------------------------------|
/// | Car     | `edge_travel_ms`             |
/// | Foot    | `edge_length_m` at 1.4 m/s   |
/// | Bicycle | `edge_length_m` at 4.2 m/s   |
///
/// Each leg between consecutive waypoints is routed independently and the
/// results concatenated, so a detour anchor forces the path through the
/// node nearest to it.
pub struct NetworkRouter {
    pub network: RoadNetwork,
}

impl NetworkRouter {
    pub fn new(network: RoadNetwork) -> Self {
        Self { network }
    }
}

impl RoutingProvider for NetworkRouter {
    fn route(&self, waypoints: &[Point], profile: Profile) -> RoutingResult<RoutePath> {
        validate_waypoints(waypoints)?;
        if self.network.is_empty() {
            return Err(RoutingError::EmptyNetwork);
        }

        let nodes: Vec<NodeId> = waypoints
            .iter()
            .filter_map(|p| self.network.snap_to_node(*p))
            .collect();

        let mut edges: Vec<EdgeId> = Vec::new();
        for leg in nodes.windows(2) {
            edges.extend(dijkstra(&self.network, leg[0], leg[1], profile)?);
        }
        if edges.is_empty() {
            return Err(RoutingError::EmptyPath);
        }

        let mut points = Vec::with_capacity(edges.len() + 1);
        points.push(self.network.node_pos[nodes[0].index()]);
        let mut streets = Vec::with_capacity(edges.len());
        for &e in &edges {
            points.push(self.network.node_pos[self.network.edge_to[e.index()].index()]);
            streets.push(self.network.street_of(e).to_owned());
        }

        let steps = derive_steps(&points, &streets);
        debug!(legs = nodes.len() - 1, edges = edges.len(), ?profile, "network route");
        Ok(RoutePath::new(points, steps))
    }

    fn name(&self) -> &str {
        "network-dijkstra"
    }
}

/// Edge cost in milliseconds for the given profile.
#[inline]
fn edge_cost_ms(network: &RoadNetwork, edge: EdgeId, profile: Profile) -> u32 {
    let length = network.edge_length_m[edge.index()];
    match profile {
        Profile::Car     => network.edge_travel_ms[edge.index()],
        Profile::Foot    => (length / 1.4 * 1000.0) as u32,
        Profile::Bicycle => (length / 4.2 * 1000.0) as u32,
    }
}

fn dijkstra(
    network: &RoadNetwork,
    from:    NodeId,
    to:      NodeId,
    profile: Profile,
) -> RoutingResult<Vec<EdgeId>> {
    if from == to {
        return Ok(Vec::new());
    }

    let n = network.node_count();
    let mut dist      = vec![u32::MAX; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];
    dist[from.index()] = 0;

    // Secondary key NodeId gives deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, to));
        }
        if cost > dist[node.index()] {
            continue;
        }
        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost.saturating_add(edge_cost_ms(network, edge, profile));
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    Err(RoutingError::NoRoute { from, to })
}

fn reconstruct(network: &RoadNetwork, prev_edge: &[EdgeId], to: NodeId) -> Vec<EdgeId> {
    let mut edges = Vec::new();
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = network.edge_from[e.index()];
    }
    edges.reverse();
    edges
}

// ── StraightLineRouter ────────────────────────────────────────────────────────

/// Connects waypoints with straight legs densified every `segment_m` metres.
///
/// Never fails for valid input.  Useful as a deterministic provider in tests
/// and as a stand-in where no road data exists.
#[derive(Clone, Debug)]
pub struct StraightLineRouter {
    pub segment_m: f64,
}

impl Default for StraightLineRouter {
    fn default() -> Self {
        Self { segment_m: 20.0 }
    }
}

impl RoutingProvider for StraightLineRouter {
    fn route(&self, waypoints: &[Point], _profile: Profile) -> RoutingResult<RoutePath> {
        validate_waypoints(waypoints)?;

        let mut points: Vec<Point> = Vec::new();
        for leg in waypoints.windows(2) {
            let d = leg[0].distance_m(leg[1]);
            let steps = (d / self.segment_m.max(1.0)).ceil().max(1.0) as usize;
            let dense = interpolate_linear(leg[0], leg[1], steps);
            let skip = usize::from(!points.is_empty());
            points.extend(dense.into_iter().skip(skip));
        }

        let steps = derive_steps(&points, &[]);
        Ok(RoutePath::new(points, steps))
    }

    fn name(&self) -> &str {
        "straight-line"
    }
}
