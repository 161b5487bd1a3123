//! Unit tests for nav-spatial.
//!
//! All tests use hand-crafted networks so they run without any map data.

#[cfg(test)]
mod helpers {
    use nav_core::{NodeId, Point};

    use crate::{RoadNetwork, RoadNetworkBuilder};

    /// 3×3 street grid with ~550 m blocks north-south and ~440 m east-west.
    ///
    /// Node `(r, c)` sits at `(37.50 + 0.005 r, 127.00 + 0.005 c)`.  Rows are
    /// named `"Row r"`, columns `"Col c"`.
    pub fn grid() -> (RoadNetwork, [[NodeId; 3]; 3]) {
        let mut b = RoadNetworkBuilder::new();
        let mut ids = [[NodeId::INVALID; 3]; 3];
        for (r, row) in ids.iter_mut().enumerate() {
            for (c, id) in row.iter_mut().enumerate() {
                *id = b.add_node(Point::new(37.50 + 0.005 * r as f64, 127.00 + 0.005 * c as f64));
            }
        }
        for r in 0..3 {
            for c in 0..2 {
                b.add_street(ids[r][c], ids[r][c + 1], &format!("Row {r}"), 30.0);
            }
        }
        for c in 0..3 {
            for r in 0..2 {
                b.add_street(ids[r][c], ids[r + 1][c], &format!("Col {c}"), 30.0);
            }
        }
        (b.build(), ids)
    }

    /// Triangle where the short road is slow for cars.
    ///
    /// A→B direct: 1000 m, 300 s.  A→C→B: 1500 m, 60 s total.
    pub fn triangle() -> (RoadNetwork, [NodeId; 3]) {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(Point::new(37.500, 127.000));
        let bb = b.add_node(Point::new(37.509, 127.000));
        let c = b.add_node(Point::new(37.504, 127.006));
        b.add_road(a, bb, 1_000.0, 300_000, "Alley");
        b.add_road(a, c, 750.0, 30_000, "Expressway");
        b.add_road(c, bb, 750.0, 30_000, "Expressway");
        (b.build(), [a, bb, c])
    }
}

// ── Builder & network structure ───────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use nav_core::Point;

    use crate::RoadNetworkBuilder;

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert!(net.snap_to_node(Point::new(37.5, 127.0)).is_none());
    }

    #[test]
    fn csr_out_edges() {
        let (net, ids) = super::helpers::grid();
        // Corner has 2 neighbours, edge-middle 3, centre 4.
        assert_eq!(net.out_edges(ids[0][0]).count(), 2);
        assert_eq!(net.out_edges(ids[0][1]).count(), 3);
        assert_eq!(net.out_edges(ids[1][1]).count(), 4);
        for e in net.out_edges(ids[1][1]) {
            assert_eq!(net.edge_from[e.index()], ids[1][1]);
        }
    }

    #[test]
    fn street_lengths_from_geometry() {
        let (net, ids) = super::helpers::grid();
        let e = net.out_edges(ids[0][0]).next().unwrap();
        let expected = net.node_pos[ids[0][0].index()]
            .distance_m(net.node_pos[net.edge_to[e.index()].index()]);
        assert!((net.edge_length_m[e.index()] - expected).abs() < 1e-9);
        assert!(net.edge_travel_ms[e.index()] > 0);
    }

    #[test]
    fn streets_are_interned() {
        let (net, ids) = super::helpers::grid();
        let names: Vec<&str> = net.out_edges(ids[0][0]).map(|e| net.street_of(e)).collect();
        assert!(names.contains(&"Row 0"));
        assert!(names.contains(&"Col 0"));
        // "" + 3 rows + 3 columns
        assert_eq!(net.street_names.len(), 7);
    }

    #[test]
    fn snap_finds_nearest() {
        let (net, ids) = super::helpers::grid();
        let near_centre = Point::new(37.5051, 127.0049);
        assert_eq!(net.snap_to_node(near_centre), Some(ids[1][1]));
    }
}

// ── NetworkRouter ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod network_router {
    use nav_core::{Point, Profile};

    use crate::{NetworkRouter, RoadNetwork, RoutingError, RoutingProvider};

    #[test]
    fn routes_between_corners() {
        let (net, ids) = super::helpers::grid();
        let start = net.node_pos[ids[0][0].index()];
        let goal = net.node_pos[ids[2][2].index()];
        let router = NetworkRouter::new(net);

        let path = router.route(&[start, goal], Profile::Foot).unwrap();
        assert_eq!(path.points.len(), 5, "four blocks on a Manhattan grid");
        assert_eq!(path.points[0], start);
        assert_eq!(*path.points.last().unwrap(), goal);
    }

    #[test]
    fn via_point_forces_detour() {
        let (net, ids) = super::helpers::grid();
        let start = net.node_pos[ids[0][0].index()];
        let via = net.node_pos[ids[0][2].index()];
        let goal = net.node_pos[ids[2][2].index()];
        let router = NetworkRouter::new(net);

        let path = router.route(&[start, via, goal], Profile::Foot).unwrap();
        assert!(path.points.contains(&via));
        // East along Row 0, then north along Col 2: one left turn.
        let kinds: Vec<&str> = path.steps.iter().map(|s| s.maneuver_type.as_str()).collect();
        assert_eq!(kinds, ["depart", "turn", "arrive"]);
        assert_eq!(path.steps[1].modifier.as_deref(), Some("left"));
        assert_eq!(path.steps[0].street_name, "Row 0");
        assert_eq!(path.steps[1].street_name, "Col 2");
        assert_eq!(path.steps[1].location, via);
    }

    #[test]
    fn step_distances_cover_the_path() {
        let (net, ids) = super::helpers::grid();
        let start = net.node_pos[ids[0][0].index()];
        let via = net.node_pos[ids[0][2].index()];
        let goal = net.node_pos[ids[2][2].index()];
        let router = NetworkRouter::new(net);

        let path = router.route(&[start, via, goal], Profile::Foot).unwrap();
        let total: f64 = path.steps.iter().map(|s| s.distance_m).sum();
        assert!((total - path.distance_m()).abs() < 1e-6);
        assert_eq!(path.steps.last().unwrap().distance_m, 0.0);
    }

    #[test]
    fn profile_changes_cost() {
        let (net, [a, b, c]) = super::helpers::triangle();
        let (pa, pb, pc) = (net.node_pos[a.index()], net.node_pos[b.index()], net.node_pos[c.index()]);
        let router = NetworkRouter::new(net);

        let foot = router.route(&[pa, pb], Profile::Foot).unwrap();
        assert_eq!(foot.points, vec![pa, pb], "walkers take the short alley");

        let car = router.route(&[pa, pb], Profile::Car).unwrap();
        assert_eq!(car.points, vec![pa, pc, pb], "cars take the expressway");
    }

    #[test]
    fn same_node_is_empty_path() {
        let (net, ids) = super::helpers::grid();
        let p = net.node_pos[ids[1][1].index()];
        let router = NetworkRouter::new(net);
        let err = router.route(&[p, Point::new(p.lat + 0.0001, p.lng)], Profile::Foot);
        assert!(matches!(err, Err(RoutingError::EmptyPath)));
    }

    #[test]
    fn disconnected_graph_has_no_route() {
        let mut b = crate::RoadNetworkBuilder::new();
        let x = b.add_node(Point::new(37.50, 127.00));
        let y = b.add_node(Point::new(37.60, 127.10));
        let router = NetworkRouter::new(b.build());
        let err = router.route(&[Point::new(37.50, 127.00), Point::new(37.60, 127.10)], Profile::Car);
        assert!(matches!(err, Err(RoutingError::NoRoute { from, to }) if from == x && to == y));
    }

    #[test]
    fn rejects_bad_input() {
        let router = NetworkRouter::new(RoadNetwork::empty());
        let p = Point::new(37.5, 127.0);
        assert!(matches!(router.route(&[p], Profile::Foot), Err(RoutingError::TooFewWaypoints(1))));
        assert!(matches!(
            router.route(&[p, Point::new(0.0, 0.0)], Profile::Foot),
            Err(RoutingError::InvalidInput(_))
        ));
        assert!(matches!(
            router.route(&[p, Point::new(37.6, 127.0)], Profile::Foot),
            Err(RoutingError::EmptyNetwork)
        ));
    }
}

// ── StraightLineRouter ────────────────────────────────────────────────────────

#[cfg(test)]
mod straight_line {
    use std::sync::Arc;

    use nav_core::{Point, Profile};

    use crate::{RoutingProvider, StraightLineRouter};

    #[test]
    fn densifies_and_keeps_endpoints() {
        let start = Point::new(37.50, 127.00);
        let goal = Point::new(37.51, 127.00);
        let router = StraightLineRouter { segment_m: 100.0 };
        let path = router.route(&[start, goal], Profile::Foot).unwrap();

        // ~1112 m at 100 m spacing → 12 segments.
        assert_eq!(path.points.len(), 13);
        assert_eq!(path.points[0], start);
        assert_eq!(*path.points.last().unwrap(), goal);
        for w in path.points.windows(2) {
            assert!(w[0].distance_m(w[1]) <= 100.0);
        }
    }

    #[test]
    fn via_point_is_shared_between_legs() {
        let start = Point::new(37.50, 127.00);
        let via = Point::new(37.50, 127.01);
        let goal = Point::new(37.51, 127.01);
        let router = StraightLineRouter::default();
        let path = router.route(&[start, via, goal], Profile::Car).unwrap();

        assert_eq!(path.points.iter().filter(|p| **p == via).count(), 1);
        let turn = path.steps.iter().find(|s| s.maneuver_type == "turn").unwrap();
        assert_eq!(turn.location, via);
        assert_eq!(turn.modifier.as_deref(), Some("left"));
    }

    #[test]
    fn works_through_arc() {
        let router: Arc<dyn RoutingProvider> = Arc::new(StraightLineRouter::default());
        let path = router
            .route(&[Point::new(37.50, 127.00), Point::new(37.50, 127.001)], Profile::Foot)
            .unwrap();
        assert!(path.is_usable());
        assert_eq!(router.name(), "straight-line");
    }
}

// ── Maneuvers ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod maneuver {
    use nav_core::Point;

    use crate::Step;
    use crate::maneuver::{derive_steps, modifier_for, turn_angle};

    #[test]
    fn classify_angles() {
        assert_eq!(modifier_for(0.0), "straight");
        assert_eq!(modifier_for(45.0), "slight right");
        assert_eq!(modifier_for(-90.0), "left");
        assert_eq!(modifier_for(150.0), "sharp right");
        assert_eq!(modifier_for(-150.0), "sharp left");
        assert_eq!(modifier_for(179.0), "uturn");
    }

    #[test]
    fn right_turn_is_positive() {
        let a = Point::new(37.50, 127.00);
        let b = Point::new(37.51, 127.00); // heading north
        let c = Point::new(37.51, 127.01); // then east
        let angle = turn_angle(a, b, c);
        assert!((angle - 90.0).abs() < 1.0, "got {angle}");
    }

    #[test]
    fn street_change_without_bend() {
        let pts = [
            Point::new(37.50, 127.00),
            Point::new(37.51, 127.00),
            Point::new(37.52, 127.00),
        ];
        let streets = vec!["Main".to_owned(), "High".to_owned()];
        let steps = derive_steps(&pts, &streets);
        let kinds: Vec<&str> = steps.iter().map(|s| s.maneuver_type.as_str()).collect();
        assert_eq!(kinds, ["depart", "new name", "arrive"]);
        assert_eq!(steps[1].street_name, "High");
        assert_eq!(steps[2].street_name, "High");
    }

    #[test]
    fn turn_step_fields() {
        let a = Point::new(37.50, 127.00);
        let b = Point::new(37.51, 127.00);
        let c = Point::new(37.51, 127.01);
        let steps = derive_steps(&[a, b, c], &[]);
        assert_eq!(steps.len(), 3);

        let turn = &steps[1];
        assert_eq!(turn.maneuver_type, "turn");
        assert_eq!(turn.modifier.as_deref(), Some("right"));
        assert_eq!(turn.location, b);
        assert!((turn.distance_m - b.distance_m(c)).abs() < 1e-6);
        assert_eq!(steps[2].modifier, None);
        assert_eq!(steps[2].distance_m, 0.0);

        let bare = Step::new("arrive", None, c);
        assert_eq!(bare.distance_m, 0.0);
        assert!(bare.street_name.is_empty());
    }

    #[test]
    fn too_short_for_steps() {
        assert!(derive_steps(&[Point::new(37.5, 127.0)], &[]).is_empty());
    }
}

// ── Providers ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod providers {
    use nav_core::Point;

    use crate::{EntranceFinder, FixedEntrances, NoEntrances, NoTransit, TransitProvider};

    #[test]
    fn fixed_entrances_filter_by_radius() {
        let origin = Point::new(37.50, 127.00);
        let near = Point::new(37.51, 127.00); // ~1.1 km
        let far = Point::new(37.70, 127.00); // ~22 km
        let finder = FixedEntrances(vec![near, far]);
        assert_eq!(finder.entrances_near(origin, 15_000.0), vec![near]);
        assert!(NoEntrances.entrances_near(origin, 15_000.0).is_empty());
    }

    #[test]
    fn no_transit_is_empty() {
        let found = NoTransit
            .find_itineraries(Point::new(37.50, 127.00), Point::new(37.55, 127.05))
            .unwrap();
        assert!(found.is_empty());
    }
}
