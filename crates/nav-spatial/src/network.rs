//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_*[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays are sorted by source node and indexed by `EdgeId`, so
//! iterating a node's outgoing edges is a contiguous scan.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lng)` to the nearest `NodeId`.  The
//! router uses it to snap request waypoints (start, detour anchors, goal)
//! onto the graph.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use nav_core::{EdgeId, NodeId, Point};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lng]
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lng space.  Good enough to rank
    /// nearby nodes within a city.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlng = self.point[1] - point[1];
        dlat * dlat + dlng * dlng
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format plus a spatial index for snapping.
///
/// Do not construct directly; use [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Point>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each edge (needed to walk `prev_edge` back to source).
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.
    pub edge_length_m: Vec<f64>,

    /// Car travel time in milliseconds.
    pub edge_travel_ms: Vec<u32>,

    /// Index into `street_names` for each edge.
    pub edge_street: Vec<u32>,

    /// Interned street names.  Index 0 is the unnamed street `""`.
    pub street_names: Vec<String>,

    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// An empty network; every routing request against it fails.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Street name carried by `edge`.
    #[inline]
    pub fn street_of(&self, edge: EdgeId) -> &str {
        &self.street_names[self.edge_street[edge.index()] as usize]
    }

    /// The nearest road node to `pos`, or `None` for an empty network.
    pub fn snap_to_node(&self, pos: Point) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lng])
            .map(|e| e.id)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use nav_core::Point;
/// use nav_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(Point::new(37.500, 127.000));
/// let c = b.add_node(Point::new(37.505, 127.000));
/// b.add_street(a, c, "Sejong-daero", 40.0);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:        Vec<Point>,
    raw_edges:    Vec<RawEdge>,
    street_names: Vec<String>,
}

struct RawEdge {
    from:      NodeId,
    to:        NodeId,
    length_m:  f64,
    travel_ms: u32,
    street:    u32,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self {
            nodes:        Vec::new(),
            raw_edges:    Vec::new(),
            street_names: vec![String::new()],
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: Point) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge from `from` to `to`.
    ///
    /// - `length_m`: physical length in metres.
    /// - `travel_ms`: car travel time in milliseconds.
    pub fn add_directed_edge(
        &mut self,
        from:      NodeId,
        to:        NodeId,
        length_m:  f64,
        travel_ms: u32,
        street:    &str,
    ) {
        let street = self.intern(street);
        self.raw_edges.push(RawEdge { from, to, length_m, travel_ms, street });
    }

    /// Add edges in **both directions** for an undirected road segment.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64, travel_ms: u32, street: &str) {
        self.add_directed_edge(a, b, length_m, travel_ms, street);
        self.add_directed_edge(b, a, length_m, travel_ms, street);
    }

    /// Undirected road whose length is the haversine distance between its
    /// nodes and whose car travel time follows from `speed_kmh`.
    pub fn add_street(&mut self, a: NodeId, b: NodeId, street: &str, speed_kmh: f64) {
        let length_m = self.nodes[a.index()].distance_m(self.nodes[b.index()]);
        let travel_ms = (length_m / (speed_kmh.max(1.0) / 3.6) * 1000.0) as u32;
        self.add_road(a, b, length_m, travel_ms, street);
    }

    /// Position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> Point {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    fn intern(&mut self, street: &str) -> u32 {
        match self.street_names.iter().position(|s| s == street) {
            Some(i) => i as u32,
            None => {
                self.street_names.push(street.to_owned());
                (self.street_names.len() - 1) as u32
            }
        }
    }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// O(E log E) for the edge sort + O(N log N) for the R-tree bulk load.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable sort keeps insertion order among a node's edges, which keeps
        // Dijkstra tie-breaking reproducible.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:      Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:        Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m:  Vec<f64>    = raw.iter().map(|e| e.length_m).collect();
        let edge_travel_ms: Vec<u32>    = raw.iter().map(|e| e.travel_ms).collect();
        let edge_street:    Vec<u32>    = raw.iter().map(|e| e.street).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, pos)| NodeEntry {
                point: [pos.lat, pos.lng],
                id:    NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_travel_ms,
            edge_street,
            street_names: self.street_names,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
