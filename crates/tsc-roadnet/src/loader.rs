//! Road-net description loader.
//!
//! # JSON format
//!
//! The description uses the CityFlow road-net layout:
//!
//! ```json
//! {
//!   "intersections": [
//!     { "id": "intersection_1_1", "point": {"x": 0, "y": 0}, "virtual": false,
//!       "roads": ["road_1_2_3", "..."],
//!       "roadLinks": [
//!         { "type": "go_straight", "startRoad": "road_1_2_3", "endRoad": "road_1_1_3",
//!           "laneLinks": [ {"startLaneIndex": 0, "endLaneIndex": 0} ] }
//!       ],
//!       "trafficLight": {
//!         "roadLinkIndices": [0],
//!         "lightphases": [ {"time": 5, "availableRoadLinks": [0]} ]
//!       } }
//!   ],
//!   "roads": [
//!     { "id": "road_1_2_3", "startIntersection": "intersection_1_2",
//!       "endIntersection": "intersection_1_1",
//!       "points": [ {"x": 0, "y": 300}, {"x": 0, "y": 0} ],
//!       "lanes": [ {"width": 3.2, "maxSpeed": 11.11} ] }
//!   ]
//! }
//! ```
//!
//! Fields the topology does not use (lane-link geometry, intersection width)
//! are parsed leniently with defaults.  Structural validation happens in
//! [`RoadNet::build`][crate::RoadNet::build], not here.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use tsc_core::Point;

use crate::RoadnetResult;

// ── Raw records ───────────────────────────────────────────────────────────────

/// The whole road-net file as written on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRoadnet {
    pub intersections: Vec<RawIntersection>,
    pub roads:         Vec<RawRoad>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
}

impl From<RawPoint> for Point {
    fn from(p: RawPoint) -> Point {
        Point::new(p.x, p.y)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIntersection {
    pub id: String,
    #[serde(default)]
    pub point: RawPoint,
    #[serde(default)]
    pub width: f64,
    /// Roads declared as touching this node.  Every entry must exist in the
    /// road list.
    #[serde(default)]
    pub roads: Vec<String>,
    #[serde(default)]
    pub road_links: Vec<RawRoadLink>,
    #[serde(default)]
    pub traffic_light: Option<RawTrafficLight>,
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRoadLink {
    #[serde(default, rename = "type")]
    pub kind:       String,
    pub start_road: String,
    pub end_road:   String,
    #[serde(default)]
    pub lane_links: Vec<RawLaneLink>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLaneLink {
    pub start_lane_index: usize,
    pub end_lane_index:   usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrafficLight {
    #[serde(default)]
    pub road_link_indices: Vec<usize>,
    #[serde(default)]
    pub lightphases: Vec<RawLightPhase>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLightPhase {
    /// Nominal duration in seconds.  Informational only.
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub available_road_links: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRoad {
    pub id:                 String,
    pub points:             Vec<RawPoint>,
    pub lanes:              Vec<RawLane>,
    pub start_intersection: String,
    pub end_intersection:   String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLane {
    #[serde(default)]
    pub width:     f64,
    #[serde(default)]
    pub max_speed: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a road-net description from a JSON file.
pub fn load_roadnet(path: &Path) -> RoadnetResult<RawRoadnet> {
    let file = std::fs::File::open(path)?;
    load_roadnet_reader(std::io::BufReader::new(file))
}

/// Like [`load_roadnet`] but accepts any `Read` source.
pub fn load_roadnet_reader<R: Read>(reader: R) -> RoadnetResult<RawRoadnet> {
    Ok(serde_json::from_reader(reader)?)
}

// ── Engine config ─────────────────────────────────────────────────────────────

/// The simulator's own config file, from which the road-net path is
/// resolved.
///
/// ```json
/// { "interval": 1.0, "seed": 0, "dir": "data/", "roadnetFile": "roadnet.json",
///   "flowFile": "flow.json", "rlTrafficLight": true }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineFileConfig {
    #[serde(default = "default_interval")]
    pub interval:          f64,
    #[serde(default)]
    pub seed:              u64,
    #[serde(default)]
    pub dir:               PathBuf,
    pub roadnet_file:      PathBuf,
    #[serde(default)]
    pub flow_file:         Option<PathBuf>,
    /// Whether signals are driven externally rather than by the simulator's
    /// built-in plans.
    #[serde(default)]
    pub rl_traffic_light:  bool,
}

fn default_interval() -> f64 {
    1.0
}

impl EngineFileConfig {
    pub fn from_path(path: &Path) -> RoadnetResult<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    /// `dir` joined with `roadnetFile`.
    pub fn roadnet_path(&self) -> PathBuf {
        self.dir.join(&self.roadnet_file)
    }
}
