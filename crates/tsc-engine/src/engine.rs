//! The `Engine` trait: the simulator capability interface.

use std::collections::HashMap;

use tsc_core::{IntersectionId, LaneId, VehicleId};

use crate::EngineResult;

/// Per-lane vehicle counts, keyed by lane id.
pub type LaneCounts = HashMap<LaneId, usize>;

/// Vehicles currently on each lane.
pub type LaneVehicles = HashMap<LaneId, Vec<VehicleId>>;

/// Distance travelled on the current lane by every running vehicle.
pub type VehicleDistances = HashMap<VehicleId, f64>;

/// A stepped traffic simulator.
///
/// Implementations wrap a concrete simulator.  Query methods take `&self`
/// and must not change simulation state; only `next_step`, `reset`, and
/// `set_tl_phase` mutate.
pub trait Engine {
    /// Advance the simulation by one interval.
    fn next_step(&mut self) -> EngineResult<()>;

    /// Rewind to the initial state (time 0, initial vehicle population).
    fn reset(&mut self) -> EngineResult<()>;

    /// Activate raw light phase `light_phase` at `intersection`.
    fn set_tl_phase(&mut self, intersection: &IntersectionId, light_phase: usize) -> EngineResult<()>;

    fn lane_vehicle_count(&self) -> EngineResult<LaneCounts>;

    /// Vehicles on each lane whose speed is below the simulator's waiting
    /// threshold.
    fn lane_waiting_vehicle_count(&self) -> EngineResult<LaneCounts>;

    fn lane_vehicles(&self) -> EngineResult<LaneVehicles>;

    fn vehicle_distance(&self) -> EngineResult<VehicleDistances>;

    /// Simulated seconds since the last reset.
    fn current_time(&self) -> EngineResult<f64>;
}
