//! Load errors for road-net descriptions.

use thiserror::Error;

use tsc_core::{IntersectionId, RoadId, TscError};

/// Errors produced while loading or building a road net.  All of them are
/// fatal: the caller never receives a partial topology.
#[derive(Debug, Error)]
pub enum RoadnetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed road-net JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] TscError),

    #[error("duplicate road id {0}")]
    DuplicateRoad(RoadId),

    #[error("duplicate intersection id {0}")]
    DuplicateIntersection(IntersectionId),

    #[error("road {0} needs at least two polyline points")]
    DegenerateRoad(RoadId),

    #[error("road {road} references unknown intersection {intersection}")]
    UnknownIntersection { road: RoadId, intersection: IntersectionId },

    #[error("intersection {intersection} references unknown road {road}")]
    UnknownRoad { intersection: IntersectionId, road: RoadId },

    #[error("intersection {intersection}: road {road} does not {expected} here")]
    MisdirectedRoadLink {
        intersection: IntersectionId,
        road:         RoadId,
        expected:     &'static str,
    },

    #[error("intersection {intersection}: lane {index} out of range for road {road} ({lanes} lanes)")]
    LaneOutOfRange {
        intersection: IntersectionId,
        road:         RoadId,
        index:        usize,
        lanes:        usize,
    },

    #[error("intersection {intersection}: light phase {phase} references roadlink {roadlink}, only {count} declared")]
    UnknownRoadLink {
        intersection: IntersectionId,
        phase:        usize,
        roadlink:     usize,
        count:        usize,
    },

    #[error("intersection {0} is not virtual but has no traffic light")]
    MissingTrafficLight(IntersectionId),

    #[error("intersection {0} has no light phase outside the yellow set")]
    NoPhases(IntersectionId),
}

pub type RoadnetResult<T> = Result<T, RoadnetError>;
