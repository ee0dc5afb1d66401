//! Unit tests for tsc-core primitives.

#[cfg(test)]
mod ids {
    use std::collections::HashMap;

    use crate::{LaneId, RoadId};

    #[test]
    fn lane_id_format() {
        let road = RoadId::new("road_0_1_0");
        assert_eq!(LaneId::of(&road, 2).as_str(), "road_0_1_0_2");
    }

    #[test]
    fn display_is_raw_string() {
        assert_eq!(RoadId::from("road_1").to_string(), "road_1");
    }

    #[test]
    fn map_lookup_by_str() {
        let mut counts: HashMap<LaneId, usize> = HashMap::new();
        counts.insert(LaneId::new("road_1_0"), 4);
        assert_eq!(counts.get("road_1_0"), Some(&4));
        assert_eq!(counts.get("road_1_1"), None);
    }
}

#[cfg(test)]
mod geo {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::Point;
    use crate::geo::normalize_angle;

    const EPS: f64 = 1e-9;

    #[test]
    fn compass_bearings() {
        let o = Point::new(0.0, 0.0);
        assert!((o.bearing_to(Point::new(0.0, 10.0)) - 0.0).abs() < EPS);
        assert!((o.bearing_to(Point::new(10.0, 0.0)) - FRAC_PI_2).abs() < EPS);
        assert!((o.bearing_to(Point::new(0.0, -10.0)) - PI).abs() < EPS);
        assert!((o.bearing_to(Point::new(-10.0, 0.0)) - 3.0 * FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn normalize_wraps_negative() {
        assert!((normalize_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < EPS);
        assert!(normalize_angle(2.0 * PI).abs() < EPS);
        assert!(normalize_angle(-1e-18) < 2.0 * PI);
    }

    #[test]
    fn zero_vector_points_north() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.bearing_to(p), 0.0);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick, WorldConfig};

    #[test]
    fn tick_displays_with_prefix() {
        assert_eq!(Tick(12).to_string(), "T12");
    }

    #[test]
    fn clock_elapsed_and_reset() {
        let mut clock = SimClock::new(0.5);
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed_secs(), 1.0);
        clock.reset();
        assert_eq!(clock.current_tick, Tick::ZERO);
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = WorldConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.yellow_phase_id(), Some(0));
    }

    #[test]
    fn invalid_configs_rejected() {
        let cfg = WorldConfig { interval: 0.0, ..WorldConfig::default() };
        assert!(cfg.validate().is_err());

        let cfg = WorldConfig { yellow_phase_time: -1.0, ..WorldConfig::default() };
        assert!(cfg.validate().is_err());

        let cfg = WorldConfig { yellow_phase_ids: vec![], ..WorldConfig::default() };
        assert!(cfg.validate().is_err());

        let cfg = WorldConfig {
            yellow_phase_ids:  vec![],
            yellow_phase_time: 0.0,
            ..WorldConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: u64 = r1.random();
            let b: u64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn streams_differ() {
        let mut r0 = SimRng::for_stream(1, 0);
        let mut r1 = SimRng::for_stream(1, 1);
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b);
    }

    #[test]
    fn index_in_bounds() {
        let mut rng = SimRng::new(0);
        assert_eq!(rng.index(0), None);
        for _ in 0..500 {
            let i = rng.index(4).unwrap();
            assert!(i < 4);
        }
    }
}
