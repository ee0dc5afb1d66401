//! Topology builder: raw description → [`RoadNet`].
//!
//! # Steps
//!
//! 1. Index roads and intersections, rejecting duplicates, dangling
//!    endpoint ids, and polylines with fewer than two points.
//! 2. For every controllable (non-virtual) intersection, collect each road
//!    touching it, once per endpoint, with its bearing away from the node.
//!    Virtual nodes contribute nothing here but their roads still count at
//!    the real node on the other end.
//! 3. Sort those roads by `(bearing, tie-break)` where the tie-break puts
//!    incoming roads first under right-hand traffic and outgoing roads
//!    first under left-hand traffic.
//! 4. Resolve the declared roadlinks into lane ids, validating direction
//!    and lane indices.
//! 5. For every light phase outside the yellow set, union the lane
//!    movements of its permitted roadlinks.

use std::hash::Hash;
use std::path::Path;

use log::{debug, info, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use tsc_core::{IntersectionId, LaneId, RoadId, TscError, WorldConfig};

use crate::loader::{RawIntersection, RawRoad, RawRoadnet};
use crate::{
    EngineFileConfig, Intersection, LaneLink, LaneSpec, Phase, Road, RoadLink, RoadNet, RoadRef,
    RoadnetError, RoadnetResult, load_roadnet,
};

impl RoadNet {
    /// Load and build in one go.
    pub fn from_path(path: &Path, config: &WorldConfig) -> RoadnetResult<RoadNet> {
        RoadNet::build(load_roadnet(path)?, config)
    }

    /// Resolve the road-net file through the simulator's config file, then
    /// load and build it.
    pub fn from_engine_config(path: &Path, config: &WorldConfig) -> RoadnetResult<RoadNet> {
        let engine = EngineFileConfig::from_path(path)?;
        RoadNet::from_path(&engine.roadnet_path(), config)
    }

    /// Validate `raw` and build the immutable topology.
    ///
    /// Uses `config.right_hand_traffic` for ordering and lane listing and
    /// `config.yellow_phase_ids` to split yellow from controllable phases.
    pub fn build(raw: RawRoadnet, config: &WorldConfig) -> RoadnetResult<RoadNet> {
        config.validate()?;
        let right = config.right_hand_traffic;
        let RawRoadnet { intersections: raw_nodes, roads: raw_roads } = raw;

        info!(
            "parsing road network: {} roads, {} intersections",
            raw_roads.len(),
            raw_nodes.len()
        );

        // ── Index nodes ───────────────────────────────────────────────────
        let mut node_ids: FxHashSet<&str> = FxHashSet::default();
        for node in &raw_nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(RoadnetError::DuplicateIntersection(node.id.as_str().into()));
            }
        }

        // ── Roads ─────────────────────────────────────────────────────────
        let mut roads: Vec<Road> = Vec::with_capacity(raw_roads.len());
        let mut road_index: FxHashMap<RoadId, usize> = FxHashMap::default();
        for raw_road in raw_roads {
            let road = convert_road(raw_road, &node_ids)?;
            if road_index.insert(road.id.clone(), roads.len()).is_some() {
                return Err(RoadnetError::DuplicateRoad(road.id));
            }
            roads.push(road);
        }

        // ── Roads touching each controllable node ─────────────────────────
        let mut touching: FxHashMap<&str, Vec<RoadRef>> = raw_nodes
            .iter()
            .filter(|n| !n.is_virtual)
            .map(|n| (n.id.as_str(), Vec::new()))
            .collect();
        for road in &roads {
            for (node, out) in [(&road.start_intersection, true), (&road.end_intersection, false)] {
                if let Some(refs) = touching.get_mut(node.as_str()) {
                    refs.push(road_ref(road, node, out, right));
                }
            }
        }

        // ── Intersections ─────────────────────────────────────────────────
        let mut intersections: Vec<Intersection> = Vec::new();
        let mut intersection_index: FxHashMap<IntersectionId, usize> = FxHashMap::default();
        for node in raw_nodes.iter().filter(|n| !n.is_virtual) {
            let mut refs = touching.remove(node.id.as_str()).unwrap_or_default();
            sort_roads(&mut refs, right);
            let built = build_intersection(node, refs, &roads, &road_index, config)?;
            intersection_index.insert(built.id.clone(), intersections.len());
            intersections.push(built);
        }

        info!(
            "road network parsed: {} controllable intersections",
            intersections.len()
        );

        Ok(RoadNet {
            roads,
            intersections,
            right_hand_traffic: right,
            yellow_phase_ids: config.yellow_phase_ids.clone(),
            road_index,
            intersection_index,
        })
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn convert_road(raw: RawRoad, node_ids: &FxHashSet<&str>) -> RoadnetResult<Road> {
    let id = RoadId::new(raw.id);
    if raw.points.len() < 2 {
        return Err(RoadnetError::DegenerateRoad(id));
    }
    for node in [&raw.start_intersection, &raw.end_intersection] {
        if !node_ids.contains(node.as_str()) {
            return Err(RoadnetError::UnknownIntersection {
                road:         id,
                intersection: node.as_str().into(),
            });
        }
    }
    Ok(Road {
        id,
        points:             raw.points.into_iter().map(Into::into).collect(),
        start_intersection: raw.start_intersection.into(),
        end_intersection:   raw.end_intersection.into(),
        lanes:              raw
            .lanes
            .into_iter()
            .map(|l| LaneSpec { width: l.width, max_speed: l.max_speed })
            .collect(),
    })
}

fn road_ref(road: &Road, node: &IntersectionId, out: bool, right: bool) -> RoadRef {
    let from_zero = if right {
        road.start_intersection == *node
    } else {
        road.end_intersection == *node
    };
    let mut lanes: Vec<LaneId> = road.lane_ids().collect();
    if !from_zero {
        lanes.reverse();
    }
    RoadRef {
        id: road.id.clone(),
        is_out: out,
        direction: road.direction(out),
        lanes,
    }
}

/// Sort clockwise from North; at equal bearings incoming roads precede
/// outgoing ones under right-hand traffic and follow them otherwise.
/// The sort is stable, so exact duplicates keep description order.
pub(crate) fn sort_roads(refs: &mut [RoadRef], right: bool) {
    refs.sort_by(|a, b| {
        a.direction
            .total_cmp(&b.direction)
            .then_with(|| (a.is_out == right).cmp(&(b.is_out == right)))
    });
}

fn build_intersection(
    node:       &RawIntersection,
    roads:      Vec<RoadRef>,
    all_roads:  &[Road],
    road_index: &FxHashMap<RoadId, usize>,
    config:     &WorldConfig,
) -> RoadnetResult<Intersection> {
    let id = IntersectionId::new(node.id.as_str());

    let lookup = |name: &str| -> RoadnetResult<&Road> {
        road_index
            .get(name)
            .map(|&i| &all_roads[i])
            .ok_or_else(|| RoadnetError::UnknownRoad {
                intersection: id.clone(),
                road:         name.into(),
            })
    };

    for name in &node.roads {
        lookup(name)?;
    }

    let light = node
        .traffic_light
        .as_ref()
        .ok_or_else(|| RoadnetError::MissingTrafficLight(id.clone()))?;

    // ── Roadlinks ─────────────────────────────────────────────────────────
    let mut roadlinks: Vec<RoadLink> = Vec::with_capacity(node.road_links.len());
    for raw_link in &node.road_links {
        let start = lookup(&raw_link.start_road)?;
        let end = lookup(&raw_link.end_road)?;
        if start.end_intersection != id {
            return Err(RoadnetError::MisdirectedRoadLink {
                intersection: id.clone(),
                road:         start.id.clone(),
                expected:     "end",
            });
        }
        if end.start_intersection != id {
            return Err(RoadnetError::MisdirectedRoadLink {
                intersection: id.clone(),
                road:         end.id.clone(),
                expected:     "start",
            });
        }

        let mut lanelinks = Vec::with_capacity(raw_link.lane_links.len());
        for ll in &raw_link.lane_links {
            for (road, index) in [(start, ll.start_lane_index), (end, ll.end_lane_index)] {
                if index >= road.lane_count() {
                    return Err(RoadnetError::LaneOutOfRange {
                        intersection: id.clone(),
                        road:         road.id.clone(),
                        index,
                        lanes:        road.lane_count(),
                    });
                }
            }
            lanelinks.push(LaneLink {
                start: LaneId::of(&start.id, ll.start_lane_index),
                end:   LaneId::of(&end.id, ll.end_lane_index),
            });
        }

        roadlinks.push(RoadLink {
            start: start.id.clone(),
            end: end.id.clone(),
            kind: raw_link.kind.clone(),
            lanelinks,
        });
    }

    let lanelinks = unique_in_order(roadlinks.iter().flat_map(|rl| rl.lanelinks.iter().cloned()));
    let startlanes = unique_in_order(lanelinks.iter().map(|ll| ll.start.clone()));

    // ── Phases ────────────────────────────────────────────────────────────
    let mut phases: Vec<Phase> = Vec::new();
    for (index, light_phase) in light.lightphases.iter().enumerate() {
        if let Some(&bad) = light_phase
            .available_road_links
            .iter()
            .find(|&&rl| rl >= roadlinks.len())
        {
            return Err(RoadnetError::UnknownRoadLink {
                intersection: id,
                phase:        index,
                roadlink:     bad,
                count:        roadlinks.len(),
            });
        }
        if config.yellow_phase_ids.contains(&index) {
            continue;
        }

        let permitted = unique_in_order(light_phase.available_road_links.iter().copied());
        let phase_lanelinks = unique_in_order(
            permitted
                .iter()
                .flat_map(|&rl| roadlinks[rl].lanelinks.iter().cloned()),
        );
        let phase_startlanes = unique_in_order(phase_lanelinks.iter().map(|ll| ll.start.clone()));
        phases.push(Phase {
            light_phase: index,
            time:        light_phase.time,
            roadlinks:   permitted,
            lanelinks:   phase_lanelinks,
            startlanes:  phase_startlanes,
        });
    }

    if phases.is_empty() {
        return Err(RoadnetError::NoPhases(id));
    }

    let light_phase_count = light.lightphases.len();
    let yellow_phase = config.yellow_phase_id();
    if config.yellow_phase_time > 0.0 {
        if let Some(yellow) = yellow_phase.filter(|&y| y >= light_phase_count) {
            return Err(TscError::Config(format!(
                "intersection {id}: yellow phase {yellow} not among its {light_phase_count} light phases"
            ))
            .into());
        }
    }

    let out_roads = roads.iter().filter(|r| r.is_out).map(|r| r.id.clone()).collect();
    let in_roads = roads.iter().filter(|r| !r.is_out).map(|r| r.id.clone()).collect();

    debug!(
        "{id}: clockwise roads {:?}",
        roads.iter().map(|r| r.id.as_str()).collect::<Vec<_>>()
    );

    let built = Intersection {
        id,
        point: node.point.into(),
        roads,
        out_roads,
        in_roads,
        roadlinks,
        lanelinks,
        startlanes,
        phases,
        light_phase_count,
        yellow_phase,
    };

    let unreachable = built.unreachable_roadlinks();
    if !unreachable.is_empty() {
        warn!("{}: roadlinks {unreachable:?} are not permitted by any phase", built.id);
    }

    Ok(built)
}

/// Deduplicate while keeping first-occurrence order, so repeated builds of
/// the same description produce identical tables.
fn unique_in_order<T: Eq + Hash + Clone>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen: FxHashSet<T> = FxHashSet::default();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
