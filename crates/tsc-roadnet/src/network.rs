//! The built road net: roads plus controllable intersections.

use rustc_hash::FxHashMap;

use tsc_core::{IntersectionId, LaneId, Point, RoadId};

use crate::{Intersection, LaneLink};

/// Per-lane attributes carried over from the description.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LaneSpec {
    pub width:     f64,
    pub max_speed: f64,
}

/// A directed road segment.
#[derive(Clone, Debug)]
pub struct Road {
    pub id:                 RoadId,
    pub points:             Vec<Point>,
    pub start_intersection: IntersectionId,
    pub end_intersection:   IntersectionId,
    pub lanes:              Vec<LaneSpec>,
}

impl Road {
    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Lane ids in ascending index order.
    pub fn lane_ids(&self) -> impl Iterator<Item = LaneId> + '_ {
        (0..self.lanes.len()).map(|i| LaneId::of(&self.id, i))
    }

    /// Clockwise angle from North pointing away from the intersection at
    /// the road's start (`out == true`) or end (`out == false`).
    ///
    /// Requires at least two points, which `RoadNet::build` guarantees.
    pub fn direction(&self, out: bool) -> f64 {
        let n = self.points.len();
        if out {
            self.points[0].bearing_to(self.points[1])
        } else {
            self.points[n - 1].bearing_to(self.points[n - 2])
        }
    }
}

/// The immutable topology.
///
/// Build with [`RoadNet::build`] or [`RoadNet::from_path`].  Safe to share
/// read-only (e.g. behind an `Arc`) across any number of consumers.
#[derive(Clone, Debug)]
pub struct RoadNet {
    /// All roads in description order, virtual endpoints included.
    pub roads: Vec<Road>,
    /// Controllable intersections in description order.
    pub intersections: Vec<Intersection>,
    pub right_hand_traffic: bool,
    /// Light phases treated as yellow when the net was built.
    pub yellow_phase_ids: Vec<usize>,

    pub(crate) road_index:         FxHashMap<RoadId, usize>,
    pub(crate) intersection_index: FxHashMap<IntersectionId, usize>,
}

impl RoadNet {
    pub fn road(&self, id: &str) -> Option<&Road> {
        self.road_index.get(id).map(|&i| &self.roads[i])
    }

    pub fn intersection(&self, id: &str) -> Option<&Intersection> {
        self.intersection_index.get(id).map(|&i| &self.intersections[i])
    }

    /// Position of a controllable intersection in [`Self::intersections`].
    pub fn intersection_position(&self, id: &str) -> Option<usize> {
        self.intersection_index.get(id).copied()
    }

    pub fn intersection_ids(&self) -> impl Iterator<Item = &IntersectionId> + '_ {
        self.intersections.iter().map(|i| &i.id)
    }

    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    /// Every lane id in the network, road by road.
    pub fn lane_ids(&self) -> impl Iterator<Item = LaneId> + '_ {
        self.roads.iter().flat_map(|r| r.lane_ids())
    }

    /// Lane links of every controllable intersection, in intersection order.
    pub fn lanelinks(&self) -> impl Iterator<Item = &LaneLink> + '_ {
        self.intersections.iter().flat_map(|i| i.lanelinks.iter())
    }

    /// Start lanes of every controllable intersection, in intersection order.
    pub fn startlanes(&self) -> impl Iterator<Item = &LaneId> + '_ {
        self.intersections.iter().flat_map(|i| i.startlanes.iter())
    }
}
