//! Per-intersection topology: ordered roads, links, and phase tables.
//!
//! Everything here is built once by [`RoadNet::build`][crate::RoadNet::build]
//! and never mutated.  The mutable signal state lives in `tsc-signal`.

use tsc_core::{IntersectionId, LaneId, Point, RoadId};

/// One permitted lane-to-lane movement.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaneLink {
    pub start: LaneId,
    pub end:   LaneId,
}

/// A permitted road-to-road connection and the lane movements realizing it.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadLink {
    pub start:     RoadId,
    pub end:       RoadId,
    /// `go_straight`, `turn_left`, `turn_right`, … as declared.
    pub kind:      String,
    pub lanelinks: Vec<LaneLink>,
}

/// A road touching an intersection, seen from that intersection.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadRef {
    pub id:        RoadId,
    /// `true` if the road leaves the intersection.
    pub is_out:    bool,
    /// Clockwise angle from North of the road's first segment away from the
    /// intersection, in `[0, 2π)`.
    pub direction: f64,
    /// The road's lanes in intersection-relative order: ascending index
    /// when the road starts here under right-hand traffic (ends here under
    /// left-hand traffic), descending otherwise.
    pub lanes:     Vec<LaneId>,
}

/// A controllable signal phase and everything it permits.
#[derive(Clone, Debug, PartialEq)]
pub struct Phase {
    /// Raw light-phase index in the description; the value sent to the
    /// simulator when this phase becomes active.
    pub light_phase: usize,
    /// Nominal duration from the description, in seconds.
    pub time:        f64,
    /// Indices into [`Intersection::roadlinks`].
    pub roadlinks:   Vec<usize>,
    /// Union of the permitted roadlinks' lane movements, first occurrence
    /// order, no duplicates.
    pub lanelinks:   Vec<LaneLink>,
    /// Distinct start lanes of `lanelinks`.
    pub startlanes:  Vec<LaneId>,
}

/// A signalized, controllable network node.
#[derive(Clone, Debug)]
pub struct Intersection {
    pub id:    IntersectionId,
    pub point: Point,

    /// Every road touching this node, sorted clockwise from North.
    pub roads:     Vec<RoadRef>,
    /// Outgoing roads, in the order of `roads`.
    pub out_roads: Vec<RoadId>,
    /// Incoming roads, in the order of `roads`.
    pub in_roads:  Vec<RoadId>,

    pub roadlinks:  Vec<RoadLink>,
    /// All lane movements of all roadlinks, deduplicated.
    pub lanelinks:  Vec<LaneLink>,
    /// Distinct start lanes over all roadlinks.
    pub startlanes: Vec<LaneId>,

    /// Controllable phases, i.e. the description's light phases minus the
    /// yellow set, in description order.
    pub phases: Vec<Phase>,
    /// Total number of light phases in the description, yellow included.
    pub light_phase_count: usize,
    /// Light phase commanded during transitions, if one is configured.
    pub yellow_phase: Option<usize>,
}

impl Intersection {
    #[inline]
    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    #[inline]
    pub fn phase(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    /// Lane ids grouped per road, in clockwise road order.  With `in_only`
    /// only incoming roads are listed.
    pub fn lanes(&self, in_only: bool) -> impl Iterator<Item = &[LaneId]> + '_ {
        self.roads
            .iter()
            .filter(move |r| !in_only || !r.is_out)
            .map(|r| r.lanes.as_slice())
    }

    /// Roadlinks declared at this node that no controllable phase permits.
    pub fn unreachable_roadlinks(&self) -> Vec<usize> {
        (0..self.roadlinks.len())
            .filter(|i| !self.phases.iter().any(|p| p.roadlinks.contains(i)))
            .collect()
    }
}
