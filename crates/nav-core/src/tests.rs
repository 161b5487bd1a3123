//! Unit tests for nav-core primitives.

#[cfg(test)]
mod geo {
    use crate::Point;

    #[test]
    fn zero_distance() {
        let p = Point::new(37.5665, 126.9780);
        assert_eq!(p.distance_m(p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(37.50, 127.00);
        let b = Point::new(37.51, 127.01);
        assert!((a.distance_m(b) - b.distance_m(a)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = Point::new(30.0, -88.0);
        let b = Point::new(31.0, -88.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn collinear_distances_add_up() {
        let a = Point::new(37.00, 127.0);
        let b = Point::new(37.01, 127.0);
        let c = Point::new(37.02, 127.0);
        let direct = a.distance_m(c);
        let via = a.distance_m(b) + b.distance_m(c);
        assert!((direct - via).abs() < 1e-3, "{direct} vs {via}");
    }

    #[test]
    fn distance_across_antimeridian_is_short() {
        let a = Point::new(0.5, 179.999);
        let b = Point::new(0.5, -179.999);
        assert!(a.distance_m(b) < 250.0);
    }

    #[test]
    fn validate_rejects_sentinel_and_garbage() {
        assert!(Point::new(0.0, 0.0).validate().is_err());
        assert!(Point::new(f64::NAN, 127.0).validate().is_err());
        assert!(Point::new(91.0, 127.0).validate().is_err());
        assert!(Point::new(37.0, 181.0).validate().is_err());
        assert!(Point::new(37.5, 127.0).validate().is_ok());
        // One zero component is a real place (the equator / prime meridian).
        assert!(Point::new(0.0, 12.0).validate().is_ok());
    }

    #[test]
    fn display() {
        assert_eq!(Point::new(37.5, 127.0).to_string(), "(37.500000, 127.000000)");
    }
}

#[cfg(test)]
mod bearing {
    use crate::Point;

    #[test]
    fn cardinal_directions() {
        let o = Point::new(10.0, 10.0);
        assert!(o.bearing_to(Point::new(11.0, 10.0)).abs() < 1e-9);
        assert!((o.bearing_to(Point::new(9.0, 10.0)) - 180.0).abs() < 1e-9);
        assert!((o.bearing_to(Point::new(10.0, 10.01)) - 90.0).abs() < 0.1);
        assert!((o.bearing_to(Point::new(10.0, 9.99)) - 270.0).abs() < 0.1);
    }

    #[test]
    fn range_is_half_open() {
        let o = Point::new(37.5, 127.0);
        for i in 0..36 {
            let target = o.destination(500.0, i as f64 * 10.0);
            let b = o.bearing_to(target);
            assert!((0.0..360.0).contains(&b), "bearing {b} out of range");
        }
    }

    #[test]
    fn coincident_points_are_finite() {
        let p = Point::new(37.5, 127.0);
        assert_eq!(p.bearing_to(p), 0.0);
        let pole = Point::new(90.0, 0.0);
        assert!(pole.bearing_to(Point::new(80.0, 10.0)).is_finite());
        assert!(pole.bearing_to(pole).is_finite());
    }
}

#[cfg(test)]
mod destination {
    use crate::Point;

    #[test]
    fn thirty_metres_east() {
        let p = Point::new(37.5, 127.0);
        let q = p.destination(30.0, 90.0);
        assert!((p.distance_m(q) - 30.0).abs() < 0.01);
        assert!((q.lat - p.lat).abs() < 1e-6);
        assert!(q.lng > p.lng);
    }

    #[test]
    fn wraps_across_antimeridian() {
        let p = Point::new(0.5, 179.9999);
        let q = p.destination(1_000.0, 90.0);
        assert!((-180.0..180.0).contains(&q.lng));
        assert!(q.lng < 0.0, "expected western hemisphere, got {}", q.lng);
    }

    #[test]
    fn zero_distance_is_identity() {
        let p = Point::new(37.5, 127.0);
        let q = p.destination(0.0, 45.0);
        assert!(p.distance_m(q) < 1e-6);
    }
}

#[cfg(test)]
mod polyline {
    use crate::{Point, interpolate_linear, path_length, project_onto_polyline};

    #[test]
    fn interpolate_endpoints_exact() {
        let a = Point::new(37.50, 127.00);
        let b = Point::new(37.51, 127.01);
        let pts = interpolate_linear(a, b, 20);
        assert_eq!(pts.len(), 21);
        assert_eq!(pts[0], a);
        assert_eq!(pts[20], b);
        let mid = pts[10];
        assert!((mid.lat - 37.505).abs() < 1e-12);
        assert!((mid.lng - 127.005).abs() < 1e-12);
    }

    #[test]
    fn interpolate_zero_steps() {
        let a = Point::new(37.5, 127.0);
        assert_eq!(interpolate_linear(a, Point::new(38.0, 127.0), 0), vec![a]);
    }

    #[test]
    fn path_length_sums_segments() {
        let pts = [
            Point::new(37.00, 127.0),
            Point::new(37.01, 127.0),
            Point::new(37.02, 127.0),
        ];
        let expected = pts[0].distance_m(pts[2]);
        assert!((path_length(&pts) - expected).abs() < 1e-3);
        assert_eq!(path_length(&pts[..1]), 0.0);
    }

    #[test]
    fn projects_onto_nearest_segment() {
        let line = [
            Point::new(37.5, 127.00),
            Point::new(37.5, 127.01),
        ];
        let p = Point::new(37.5009, 127.005);
        let proj = project_onto_polyline(p, &line).unwrap();
        assert_eq!(proj.segment, 0);
        assert!((proj.point.lat - 37.5).abs() < 1e-9);
        assert!((proj.point.lng - 127.005).abs() < 1e-6);
        assert!((proj.distance_m - 100.0).abs() < 1.0, "got {}", proj.distance_m);
        let half = line[0].distance_m(line[1]) / 2.0;
        assert!((proj.along_m - half).abs() < 1.0);
    }

    #[test]
    fn picks_later_segment_when_closer() {
        let line = [
            Point::new(37.50, 127.00),
            Point::new(37.50, 127.01),
            Point::new(37.51, 127.01),
        ];
        let p = Point::new(37.505, 127.0105);
        let proj = project_onto_polyline(p, &line).unwrap();
        assert_eq!(proj.segment, 1);
        assert!(proj.along_m > line[0].distance_m(line[1]));
    }

    #[test]
    fn clamps_beyond_endpoints() {
        let line = [Point::new(37.5, 127.00), Point::new(37.5, 127.01)];
        let proj = project_onto_polyline(Point::new(37.5, 126.99), &line).unwrap();
        assert_eq!(proj.point, line[0]);
        assert_eq!(proj.along_m, 0.0);
    }

    #[test]
    fn degenerate_inputs() {
        let p = Point::new(37.5, 127.0);
        assert!(project_onto_polyline(p, &[]).is_none());

        let single = project_onto_polyline(p, &[Point::new(37.501, 127.0)]).unwrap();
        assert!((single.distance_m - 111.2).abs() < 1.0);

        let repeated = [Point::new(37.501, 127.0); 4];
        let proj = project_onto_polyline(p, &repeated).unwrap();
        assert!(proj.distance_m.is_finite());
        assert_eq!(proj.segment, 0);
    }
}

#[cfg(test)]
mod ids {
    use crate::{EdgeId, Generation, NodeId, RouteId};

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::default(), EdgeId::INVALID);
        assert_eq!(NodeId(42).index(), 42);
    }

    #[test]
    fn next_is_monotonic() {
        let g = Generation::ZERO;
        assert!(g.next() > g);
        assert_eq!(g.next().next(), Generation(2));
        assert_eq!(Generation(u64::MAX).next(), Generation(u64::MAX));
    }

    #[test]
    fn display() {
        assert_eq!(RouteId(3).to_string(), "RouteId(3)");
    }
}

#[cfg(test)]
mod transport {
    use crate::{Profile, TravelMode};

    #[test]
    fn profiles() {
        assert_eq!(TravelMode::Stroll.profile(), Profile::Foot);
        assert_eq!(TravelMode::Transit.profile(), Profile::Foot);
        assert_eq!(TravelMode::Cycling.profile(), Profile::Bicycle);
        assert_eq!(TravelMode::Driving.profile(), Profile::Car);
    }

    #[test]
    fn speeds() {
        assert_eq!(TravelMode::Walking.speed_m_per_min(), 67.0);
        assert_eq!(TravelMode::Stroll.speed_m_per_min(), 50.0);
        assert_eq!(TravelMode::Cycling.speed_m_per_min(), 250.0);
        assert_eq!(TravelMode::Driving.speed_m_per_min(), 400.0);
    }

    #[test]
    fn pedestrian_modes() {
        assert!(TravelMode::Walking.is_pedestrian());
        assert!(TravelMode::Stroll.is_pedestrian());
        assert!(!TravelMode::Driving.is_pedestrian());
        assert!(!TravelMode::Transit.is_pedestrian());
    }

    #[test]
    fn display() {
        assert_eq!(TravelMode::Cycling.to_string(), "cycling");
        assert_eq!(Profile::Car.to_string(), "car");
    }
}

#[cfg(test)]
mod config {
    use crate::{NavConfig, TravelMode};

    #[test]
    fn defaults_are_valid() {
        let cfg = NavConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.tracker.debounce_count, 3);
        assert_eq!(cfg.synth.detection_radius_m(TravelMode::Driving), 200.0);
        assert_eq!(cfg.synth.detection_radius_m(TravelMode::Stroll), 60.0);
    }

    #[test]
    fn rejects_zero_debounce() {
        let mut cfg = NavConfig::default();
        cfg.tracker.debounce_count = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_stride() {
        let mut cfg = NavConfig::default();
        cfg.synth.sample_stride = 0;
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{FixNoise, Point};

    #[test]
    fn deterministic_same_seed() {
        let p = Point::new(37.5, 127.0);
        let mut a = FixNoise::new(7);
        let mut b = FixNoise::new(7);
        for _ in 0..50 {
            assert_eq!(a.jitter(p, 10.0), b.jitter(p, 10.0));
        }
    }

    #[test]
    fn jitter_stays_within_bound() {
        let p = Point::new(37.5, 127.0);
        let mut noise = FixNoise::new(1);
        for _ in 0..500 {
            let q = noise.jitter(p, 8.0);
            assert!(p.distance_m(q) <= 8.0 + 1e-6);
        }
        assert_eq!(noise.jitter(p, 0.0), p);
    }
}
