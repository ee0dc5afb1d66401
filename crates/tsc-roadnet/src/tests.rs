//! Unit tests for tsc-roadnet.
//!
//! Most tests use `testdata/four_way.json`: one signalized node
//! `intersection_1_1` at the origin with four virtual neighbours.
//!
//! ```text
//!                road_1_2_3 (in, from North)
//!                      │
//! road_1_1_2 ◀── intersection_1_1 ◀── road_2_1_2 (in, from East)
//! (out, West)          │
//!                road_1_1_3 (out, to South)
//! ```
//!
//! Light phases: 0 = yellow, 1 = {N→S}, 2 = {E→W, N→W}.  Roadlink 3
//! (E→S) is permitted by no phase.

#[cfg(test)]
mod helpers {
    use serde_json::{Value, json};

    use tsc_core::WorldConfig;

    use crate::{RawRoadnet, RoadNet, load_roadnet_reader};

    pub const FOUR_WAY: &str = include_str!("../testdata/four_way.json");

    pub fn raw_four_way() -> RawRoadnet {
        load_roadnet_reader(FOUR_WAY.as_bytes()).unwrap()
    }

    pub fn four_way() -> RoadNet {
        RoadNet::build(raw_four_way(), &WorldConfig::default()).unwrap()
    }

    pub fn from_value(v: Value) -> RawRoadnet {
        serde_json::from_value(v).unwrap()
    }

    /// A single node with one two-way arm to the North: an incoming and an
    /// outgoing road sharing the same bearing.
    pub fn two_way_arm() -> RawRoadnet {
        from_value(json!({
            "intersections": [
                { "id": "c", "virtual": false, "roadLinks": [],
                  "trafficLight": { "lightphases": [
                      {"availableRoadLinks": []}, {"availableRoadLinks": []} ] } },
                { "id": "n", "virtual": true }
            ],
            "roads": [
                { "id": "out_n", "startIntersection": "c", "endIntersection": "n",
                  "points": [{"x": 0, "y": 0}, {"x": 0, "y": 100}],
                  "lanes": [{"width": 3, "maxSpeed": 10}] },
                { "id": "in_n", "startIntersection": "n", "endIntersection": "c",
                  "points": [{"x": 0, "y": 100}, {"x": 0, "y": 0}],
                  "lanes": [{"width": 3, "maxSpeed": 10}] }
            ]
        }))
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use std::io::Write;

    use super::helpers::*;
    use crate::{EngineFileConfig, RoadnetError, load_roadnet, load_roadnet_reader};

    #[test]
    fn parses_camel_case_fields() {
        let raw = raw_four_way();
        assert_eq!(raw.intersections.len(), 5);
        assert_eq!(raw.roads.len(), 4);
        let center = &raw.intersections[0];
        assert!(!center.is_virtual);
        assert_eq!(center.road_links.len(), 4);
        assert_eq!(center.road_links[2].kind, "turn_right");
        let light = center.traffic_light.as_ref().unwrap();
        assert_eq!(light.lightphases[2].available_road_links, vec![1, 2]);
        assert_eq!(raw.roads[0].start_intersection, "intersection_1_2");
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let err = load_roadnet_reader("{ \"roads\": [".as_bytes()).unwrap_err();
        assert!(matches!(err, RoadnetError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_roadnet(std::path::Path::new("/nonexistent/roadnet.json")).unwrap_err();
        assert!(matches!(err, RoadnetError::Io(_)));
    }

    #[test]
    fn engine_config_resolves_roadnet_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("roadnet.json"), FOUR_WAY).unwrap();

        let config_path = dir.path().join("config.json");
        let mut f = std::fs::File::create(&config_path).unwrap();
        write!(
            f,
            r#"{{"interval": 1.0, "seed": 7, "dir": "{}", "roadnetFile": "roadnet.json", "rlTrafficLight": true}}"#,
            dir.path().display()
        )
        .unwrap();

        let cfg = EngineFileConfig::from_path(&config_path).unwrap();
        assert_eq!(cfg.seed, 7);
        assert!(cfg.rl_traffic_light);
        assert_eq!(cfg.roadnet_path(), dir.path().join("roadnet.json"));

        let net = crate::RoadNet::from_engine_config(
            &config_path,
            &tsc_core::WorldConfig::default(),
        )
        .unwrap();
        assert_eq!(net.intersection_count(), 1);
    }
}

// ── Ordering ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ordering_tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use tsc_core::WorldConfig;

    use super::helpers::*;
    use crate::RoadNet;

    #[test]
    fn virtual_nodes_are_not_controllable() {
        let net = four_way();
        let ids: Vec<_> = net.intersection_ids().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["intersection_1_1"]);
        assert_eq!(net.roads.len(), 4);
    }

    #[test]
    fn clockwise_from_north() {
        let net = four_way();
        let ix = net.intersection("intersection_1_1").unwrap();
        let order: Vec<_> = ix.roads.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, vec!["road_1_2_3", "road_2_1_2", "road_1_1_3", "road_1_1_2"]);

        let dirs: Vec<f64> = ix.roads.iter().map(|r| r.direction).collect();
        let expected = [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2];
        for (d, e) in dirs.iter().zip(expected) {
            assert!((d - e).abs() < 1e-9, "{d} vs {e}");
        }
        assert!(dirs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn in_out_split_preserves_order() {
        let net = four_way();
        let ix = net.intersection("intersection_1_1").unwrap();
        let ins: Vec<_> = ix.in_roads.iter().map(|r| r.as_str()).collect();
        let outs: Vec<_> = ix.out_roads.iter().map(|r| r.as_str()).collect();
        assert_eq!(ins, vec!["road_1_2_3", "road_2_1_2"]);
        assert_eq!(outs, vec!["road_1_1_3", "road_1_1_2"]);
    }

    #[test]
    fn tie_break_right_hand_puts_incoming_first() {
        let net = RoadNet::build(two_way_arm(), &WorldConfig::default()).unwrap();
        let ix = net.intersection("c").unwrap();
        let order: Vec<_> = ix.roads.iter().map(|r| (r.id.as_str(), r.is_out)).collect();
        assert_eq!(order, vec![("in_n", false), ("out_n", true)]);
    }

    #[test]
    fn tie_break_left_hand_puts_outgoing_first() {
        let cfg = WorldConfig { right_hand_traffic: false, ..WorldConfig::default() };
        let net = RoadNet::build(two_way_arm(), &cfg).unwrap();
        let ix = net.intersection("c").unwrap();
        let order: Vec<_> = ix.roads.iter().map(|r| (r.id.as_str(), r.is_out)).collect();
        assert_eq!(order, vec![("out_n", true), ("in_n", false)]);
    }

    #[test]
    fn lane_listing_direction() {
        let net = four_way();
        let ix = net.intersection("intersection_1_1").unwrap();
        let lanes: Vec<Vec<&str>> = ix
            .lanes(false)
            .map(|ls| ls.iter().map(|l| l.as_str()).collect())
            .collect();
        assert_eq!(lanes[0], vec!["road_1_2_3_1", "road_1_2_3_0"]);
        assert_eq!(lanes[2], vec!["road_1_1_3_0", "road_1_1_3_1"]);

        let incoming: Vec<_> = ix.lanes(true).collect();
        assert_eq!(incoming.len(), 2);
    }

    #[test]
    fn lane_listing_flips_for_left_hand_traffic() {
        let cfg = WorldConfig { right_hand_traffic: false, ..WorldConfig::default() };
        let net = RoadNet::build(raw_four_way(), &cfg).unwrap();
        let ix = net.intersection("intersection_1_1").unwrap();
        let first = ix.roads.iter().find(|r| r.id.as_str() == "road_1_2_3").unwrap();
        assert_eq!(first.lanes[0].as_str(), "road_1_2_3_0");
    }
}

// ── Links and phases ──────────────────────────────────────────────────────────

#[cfg(test)]
mod phase_table_tests {
    use super::helpers::*;
    use crate::LaneLink;

    fn ll(start: &str, end: &str) -> LaneLink {
        LaneLink { start: start.into(), end: end.into() }
    }

    #[test]
    fn yellow_is_excluded_from_phases() {
        let net = four_way();
        let ix = net.intersection("intersection_1_1").unwrap();
        let light: Vec<usize> = ix.phases.iter().map(|p| p.light_phase).collect();
        assert_eq!(light, vec![1, 2]);
        assert_eq!(ix.light_phase_count, 3);
        assert_eq!(ix.yellow_phase, Some(0));
    }

    #[test]
    fn north_south_phase_gets_exactly_its_lanelinks() {
        let net = four_way();
        let ix = net.intersection("intersection_1_1").unwrap();
        let phase = ix.phase(0).unwrap();
        assert_eq!(phase.roadlinks, vec![0]);
        assert_eq!(
            phase.lanelinks,
            vec![ll("road_1_2_3_0", "road_1_1_3_0"), ll("road_1_2_3_1", "road_1_1_3_1")]
        );
        let starts: Vec<_> = phase.startlanes.iter().map(|l| l.as_str()).collect();
        assert_eq!(starts, vec!["road_1_2_3_0", "road_1_2_3_1"]);
    }

    #[test]
    fn startlanes_are_deduplicated() {
        let net = four_way();
        let ix = net.intersection("intersection_1_1").unwrap();
        // road_1_2_3_0 feeds both the straight and the right-turn link.
        let count = ix.startlanes.iter().filter(|l| l.as_str() == "road_1_2_3_0").count();
        assert_eq!(count, 1);
        assert_eq!(ix.startlanes.len(), 4);
        assert_eq!(ix.lanelinks.len(), 6);
    }

    #[test]
    fn unreachable_roadlink_is_absent_from_every_phase() {
        let net = four_way();
        let ix = net.intersection("intersection_1_1").unwrap();
        let orphan = ll("road_2_1_2_1", "road_1_1_3_1");

        assert!(ix.lanelinks.contains(&orphan));
        for phase in &ix.phases {
            assert!(!phase.lanelinks.contains(&orphan));
        }
        assert_eq!(ix.unreachable_roadlinks(), vec![3]);
    }

    #[test]
    fn every_phase_lanelink_belongs_to_a_permitted_roadlink() {
        let net = four_way();
        let ix = net.intersection("intersection_1_1").unwrap();
        for phase in &ix.phases {
            for link in &phase.lanelinks {
                assert!(
                    phase
                        .roadlinks
                        .iter()
                        .any(|&rl| ix.roadlinks[rl].lanelinks.contains(link))
                );
            }
        }
    }

    #[test]
    fn lanelink_start_lanes_lie_on_incoming_roads() {
        let net = four_way();
        let ix = net.intersection("intersection_1_1").unwrap();
        for rl in &ix.roadlinks {
            assert!(ix.in_roads.contains(&rl.start));
            assert!(ix.out_roads.contains(&rl.end));
            for link in &rl.lanelinks {
                assert!(link.start.as_str().starts_with(rl.start.as_str()));
            }
        }
    }

    #[test]
    fn network_wide_tables_concatenate_intersections() {
        let net = four_way();
        assert_eq!(net.lanelinks().count(), 6);
        assert_eq!(net.startlanes().count(), 4);
        assert_eq!(net.lane_ids().count(), 8);
        assert_eq!(net.yellow_phase_ids, vec![0]);
    }

    #[test]
    fn build_is_deterministic() {
        let a = four_way();
        let b = four_way();
        let (ia, ib) = (&a.intersections[0], &b.intersections[0]);
        assert_eq!(ia.roads, ib.roads);
        assert_eq!(ia.lanelinks, ib.lanelinks);
        assert_eq!(ia.phases, ib.phases);
    }
}

// ── Build failures ────────────────────────────────────────────────────────────

#[cfg(test)]
mod error_tests {
    use serde_json::{Value, json};

    use tsc_core::WorldConfig;

    use super::helpers::*;
    use crate::{RoadNet, RoadnetError};

    fn four_way_value() -> Value {
        serde_json::from_str(FOUR_WAY).unwrap()
    }

    fn build(v: Value) -> Result<RoadNet, RoadnetError> {
        RoadNet::build(from_value(v), &WorldConfig::default())
    }

    #[test]
    fn phase_with_undeclared_roadlink_fails() {
        let mut v = four_way_value();
        v["intersections"][0]["trafficLight"]["lightphases"][1]["availableRoadLinks"] = json!([0, 9]);
        let err = build(v).unwrap_err();
        assert!(matches!(err, RoadnetError::UnknownRoadLink { roadlink: 9, phase: 1, .. }));
    }

    #[test]
    fn yellow_phase_references_are_validated_too() {
        let mut v = four_way_value();
        v["intersections"][0]["trafficLight"]["lightphases"][0]["availableRoadLinks"] = json!([4]);
        assert!(matches!(build(v), Err(RoadnetError::UnknownRoadLink { phase: 0, .. })));
    }

    #[test]
    fn roadlink_with_unknown_road_fails() {
        let mut v = four_way_value();
        v["intersections"][0]["roadLinks"][1]["endRoad"] = json!("road_missing");
        let err = build(v).unwrap_err();
        assert!(matches!(err, RoadnetError::UnknownRoad { .. }));
    }

    #[test]
    fn declared_road_list_is_checked() {
        let mut v = four_way_value();
        v["intersections"][0]["roads"] = json!(["road_1_2_3", "road_ghost"]);
        assert!(matches!(build(v), Err(RoadnetError::UnknownRoad { .. })));
    }

    #[test]
    fn road_with_unknown_endpoint_fails() {
        let mut v = four_way_value();
        v["roads"][0]["startIntersection"] = json!("intersection_9_9");
        assert!(matches!(build(v), Err(RoadnetError::UnknownIntersection { .. })));
    }

    #[test]
    fn lane_index_out_of_range_fails() {
        let mut v = four_way_value();
        v["intersections"][0]["roadLinks"][0]["laneLinks"][1]["endLaneIndex"] = json!(5);
        assert!(matches!(build(v), Err(RoadnetError::LaneOutOfRange { index: 5, .. })));
    }

    #[test]
    fn reversed_roadlink_fails() {
        let mut v = four_way_value();
        v["intersections"][0]["roadLinks"][0]["startRoad"] = json!("road_1_1_2");
        assert!(matches!(build(v), Err(RoadnetError::MisdirectedRoadLink { .. })));
    }

    #[test]
    fn degenerate_polyline_fails() {
        let mut v = four_way_value();
        v["roads"][2]["points"] = json!([{"x": 0, "y": 0}]);
        assert!(matches!(build(v), Err(RoadnetError::DegenerateRoad(_))));
    }

    #[test]
    fn duplicate_ids_fail() {
        let mut v = four_way_value();
        let dup = v["roads"][0].clone();
        v["roads"].as_array_mut().unwrap().push(dup);
        assert!(matches!(build(v), Err(RoadnetError::DuplicateRoad(_))));

        let mut v = four_way_value();
        let dup = v["intersections"][1].clone();
        v["intersections"].as_array_mut().unwrap().push(dup);
        assert!(matches!(build(v), Err(RoadnetError::DuplicateIntersection(_))));
    }

    #[test]
    fn signal_without_traffic_light_fails() {
        let mut v = four_way_value();
        v["intersections"][0].as_object_mut().unwrap().remove("trafficLight");
        assert!(matches!(build(v), Err(RoadnetError::MissingTrafficLight(_))));
    }

    #[test]
    fn only_yellow_phases_fails() {
        let cfg = WorldConfig { yellow_phase_ids: vec![0, 1, 2], ..WorldConfig::default() };
        let err = RoadNet::build(raw_four_way(), &cfg).unwrap_err();
        assert!(matches!(err, RoadnetError::NoPhases(_)));
    }

    #[test]
    fn invalid_config_fails_before_parsing() {
        let cfg = WorldConfig { interval: -1.0, ..WorldConfig::default() };
        assert!(matches!(RoadNet::build(raw_four_way(), &cfg), Err(RoadnetError::Core(_))));
    }
}
