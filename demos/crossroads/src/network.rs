//! Synthetic crossroads road net.
//!
//! One signalized node `center` with four two-lane arms.  Each arm ends at a
//! virtual node 300 m away and carries an `{arm}_in` and an `{arm}_out` road.
//!
//! Roadlinks: 0–3 straight (N, E, S, W), 4–7 right turns (N, E, S, W).
//! Light phases: 0 = yellow, 1 = north–south, 2 = east–west.

use serde_json::{Value, json};

use tsc_core::WorldConfig;
use tsc_roadnet::{RawRoadnet, RoadNet, RoadnetResult};

pub const CENTER: &str = "center";

/// Arm names with the offset of their far end, clockwise from North.
pub const ARMS: [(&str, f64, f64); 4] = [
    ("north", 0.0, 300.0),
    ("east", 300.0, 0.0),
    ("south", 0.0, -300.0),
    ("west", -300.0, 0.0),
];

const LANES: usize = 2;

fn lanes() -> Value {
    Value::Array(vec![json!({"width": 3.5, "maxSpeed": 13.9}); LANES])
}

fn describe() -> Value {
    let mut intersections = vec![];
    let mut roads = vec![];
    let mut road_ids = vec![];

    for (arm, x, y) in ARMS {
        let far = format!("{arm}_end");
        intersections.push(json!({
            "id": far, "point": {"x": x, "y": y}, "virtual": true,
            "roads": [format!("{arm}_in"), format!("{arm}_out")]
        }));
        roads.push(json!({
            "id": format!("{arm}_in"), "startIntersection": far, "endIntersection": CENTER,
            "points": [{"x": x, "y": y}, {"x": 0.0, "y": 0.0}], "lanes": lanes()
        }));
        roads.push(json!({
            "id": format!("{arm}_out"), "startIntersection": CENTER, "endIntersection": far,
            "points": [{"x": 0.0, "y": 0.0}, {"x": x, "y": y}], "lanes": lanes()
        }));
        road_ids.push(format!("{arm}_in"));
        road_ids.push(format!("{arm}_out"));
    }

    let link = |from: usize, to: usize, kind: &str, lane_pairs: &[(usize, usize)]| {
        let lane_links: Vec<Value> = lane_pairs
            .iter()
            .map(|&(s, e)| json!({"startLaneIndex": s, "endLaneIndex": e, "points": []}))
            .collect();
        json!({
            "type": kind,
            "startRoad": format!("{}_in", ARMS[from].0),
            "endRoad": format!("{}_out", ARMS[to].0),
            "laneLinks": lane_links
        })
    };
    let mut road_links = vec![];
    for i in 0..4 {
        road_links.push(link(i, (i + 2) % 4, "go_straight", &[(0, 0), (1, 1)]));
    }
    for i in 0..4 {
        road_links.push(link(i, (i + 3) % 4, "turn_right", &[(0, 0)]));
    }

    intersections.insert(0, json!({
        "id": CENTER, "point": {"x": 0.0, "y": 0.0}, "width": 20.0, "virtual": false,
        "roads": road_ids,
        "roadLinks": road_links,
        "trafficLight": {
            "roadLinkIndices": (0..8).collect::<Vec<_>>(),
            "lightphases": [
                {"time": 3, "availableRoadLinks": []},
                {"time": 30, "availableRoadLinks": [0, 2, 4, 6]},
                {"time": 30, "availableRoadLinks": [1, 3, 5, 7]}
            ]
        }
    }));

    json!({"intersections": intersections, "roads": roads})
}

/// Build the crossroads topology under `config`.
pub fn build_roadnet(config: &WorldConfig) -> RoadnetResult<RoadNet> {
    let raw: RawRoadnet = serde_json::from_value(describe())?;
    RoadNet::build(raw, config)
}
