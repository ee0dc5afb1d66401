//! `TravelTimeMetric`: mean time vehicles spend in the network.

use rustc_hash::{FxHashMap, FxHashSet};

use tsc_core::VehicleId;
use tsc_engine::Engine;
use tsc_telemetry::QueryKind;
use tsc_world::World;

use crate::AgentResult;

/// Tracks when each vehicle first appears on a lane and closes its trip
/// when it disappears.
///
/// Travel time of a trip is `time of the first update without the vehicle −
/// time of the first update with it`.
#[derive(Debug, Default)]
pub struct TravelTimeMetric {
    entered:      FxHashMap<VehicleId, f64>,
    travel_times: Vec<f64>,
}

impl TravelTimeMetric {
    /// Subscribe the lane vehicle and time queries.
    pub fn new<E: Engine>(world: &mut World<E>) -> Self {
        world.subscribe(QueryKind::LaneVehicles);
        world.subscribe(QueryKind::Time);
        Self::default()
    }

    /// Fold the current snapshot in and return the mean travel time of all
    /// closed trips (0 when there are none).
    ///
    /// With `done` every vehicle still in the network has its trip closed
    /// at the current time.
    pub fn update<E: Engine>(&mut self, world: &World<E>, done: bool) -> AgentResult<f64> {
        let telemetry = world.telemetry();
        let now = telemetry.time()?;
        let present: FxHashSet<&VehicleId> = telemetry.lane_vehicles()?.values().flatten().collect();

        for &vehicle in &present {
            self.entered.entry(vehicle.clone()).or_insert(now);
        }
        self.entered.retain(|vehicle, &mut entered| {
            let closed = done || !present.contains(vehicle);
            if closed {
                self.travel_times.push(now - entered);
            }
            !closed
        });
        Ok(self.mean())
    }

    pub fn mean(&self) -> f64 {
        if self.travel_times.is_empty() {
            return 0.0;
        }
        self.travel_times.iter().sum::<f64>() / self.travel_times.len() as f64
    }

    pub fn completed(&self) -> usize {
        self.travel_times.len()
    }

    /// Vehicles currently on a trip.
    pub fn in_flight(&self) -> usize {
        self.entered.len()
    }

    pub fn reset(&mut self) {
        self.entered.clear();
        self.travel_times.clear();
    }
}
