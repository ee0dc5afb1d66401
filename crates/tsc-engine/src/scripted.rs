//! `ScriptedEngine`: deterministic in-memory simulator stand-in.

use std::cell::Cell;

use log::trace;

use tsc_core::{IntersectionId, LaneId, VehicleId};

use crate::{Engine, EngineError, EngineResult, LaneCounts, LaneVehicles, VehicleDistances};

/// One `set_tl_phase` call as seen by the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandRecord {
    /// Number of `next_step` calls completed when the command arrived.
    pub step:         u64,
    pub intersection: IntersectionId,
    pub light_phase:  usize,
}

/// Number of times each query method has been called.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryCalls {
    pub lane_count:         usize,
    pub lane_waiting_count: usize,
    pub lane_vehicles:      usize,
    pub vehicle_distance:   usize,
    pub time:               usize,
}

/// An [`Engine`] whose measurements are whatever the caller last set.
///
/// Vehicles never move on their own: `next_step` only advances the clock.
/// Tests mutate the lane state between steps to script traffic, then
/// inspect [`commands`][Self::commands] and [`query_calls`][Self::query_calls]
/// to check what the core asked for.
///
/// `reset` rewinds the clock but keeps lane state and the command log.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    interval: f64,
    steps:    u64,
    resets:   u64,

    lane_counts: LaneCounts,
    waiting:     LaneCounts,
    vehicles:    LaneVehicles,
    distances:   VehicleDistances,

    active:   Vec<(IntersectionId, usize)>,
    commands: Vec<CommandRecord>,

    fail_next_step: bool,
    fail_queries:   bool,

    calls: Cell<QueryCalls>,
}

impl ScriptedEngine {
    pub fn new(interval: f64) -> Self {
        Self { interval, ..Self::default() }
    }

    // ── Scripting ─────────────────────────────────────────────────────────

    pub fn set_lane_count(&mut self, lane: impl Into<LaneId>, count: usize) {
        self.lane_counts.insert(lane.into(), count);
    }

    pub fn set_waiting_count(&mut self, lane: impl Into<LaneId>, count: usize) {
        self.waiting.insert(lane.into(), count);
    }

    /// Put `vehicle` on `lane`, removing it from any other lane, and keep the
    /// lane's vehicle count in sync.
    pub fn place_vehicle(&mut self, lane: impl Into<LaneId>, vehicle: impl Into<VehicleId>) {
        let vehicle = vehicle.into();
        self.remove_vehicle(&vehicle);
        let lane = lane.into();
        self.vehicles.entry(lane.clone()).or_default().push(vehicle.clone());
        *self.lane_counts.entry(lane).or_default() += 1;
        self.distances.insert(vehicle, 0.0);
    }

    /// Take `vehicle` off the network.  Returns `false` if it was not on it.
    pub fn remove_vehicle(&mut self, vehicle: &VehicleId) -> bool {
        let mut found = false;
        for (lane, list) in self.vehicles.iter_mut() {
            if let Some(pos) = list.iter().position(|v| v == vehicle) {
                list.remove(pos);
                if let Some(count) = self.lane_counts.get_mut(lane) {
                    *count = count.saturating_sub(1);
                }
                found = true;
            }
        }
        self.distances.remove(vehicle);
        found
    }

    pub fn set_distance(&mut self, vehicle: impl Into<VehicleId>, metres: f64) {
        self.distances.insert(vehicle.into(), metres);
    }

    /// Make the next `next_step` call fail once.
    pub fn fail_next_step(&mut self) {
        self.fail_next_step = true;
    }

    /// Make every query fail until cleared.
    pub fn set_fail_queries(&mut self, fail: bool) {
        self.fail_queries = fail;
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn commands(&self) -> &[CommandRecord] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<CommandRecord> {
        std::mem::take(&mut self.commands)
    }

    /// The last light phase commanded at `intersection`, if any.
    pub fn active_phase(&self, intersection: &str) -> Option<usize> {
        self.active
            .iter()
            .find(|(id, _)| id.as_str() == intersection)
            .map(|&(_, phase)| phase)
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn resets(&self) -> u64 {
        self.resets
    }

    pub fn query_calls(&self) -> QueryCalls {
        self.calls.get()
    }

    fn record(&self, bump: impl FnOnce(&mut QueryCalls)) -> EngineResult<()> {
        let mut calls = self.calls.get();
        bump(&mut calls);
        self.calls.set(calls);
        if self.fail_queries {
            return Err(EngineError::Backend("scripted query failure".into()));
        }
        Ok(())
    }
}

impl Engine for ScriptedEngine {
    fn next_step(&mut self) -> EngineResult<()> {
        if std::mem::take(&mut self.fail_next_step) {
            return Err(EngineError::Backend("scripted step failure".into()));
        }
        self.steps += 1;
        trace!("scripted engine stepped to {}", self.steps);
        Ok(())
    }

    fn reset(&mut self) -> EngineResult<()> {
        self.steps = 0;
        self.resets += 1;
        self.active.clear();
        Ok(())
    }

    fn set_tl_phase(&mut self, intersection: &IntersectionId, light_phase: usize) -> EngineResult<()> {
        match self.active.iter_mut().find(|(id, _)| id == intersection) {
            Some(entry) => entry.1 = light_phase,
            None => self.active.push((intersection.clone(), light_phase)),
        }
        self.commands.push(CommandRecord {
            step: self.steps,
            intersection: intersection.clone(),
            light_phase,
        });
        Ok(())
    }

    fn lane_vehicle_count(&self) -> EngineResult<LaneCounts> {
        self.record(|c| c.lane_count += 1)?;
        Ok(self.lane_counts.clone())
    }

    fn lane_waiting_vehicle_count(&self) -> EngineResult<LaneCounts> {
        self.record(|c| c.lane_waiting_count += 1)?;
        Ok(self.waiting.clone())
    }

    fn lane_vehicles(&self) -> EngineResult<LaneVehicles> {
        self.record(|c| c.lane_vehicles += 1)?;
        Ok(self.vehicles.clone())
    }

    fn vehicle_distance(&self) -> EngineResult<VehicleDistances> {
        self.record(|c| c.vehicle_distance += 1)?;
        Ok(self.distances.clone())
    }

    fn current_time(&self) -> EngineResult<f64> {
        self.record(|c| c.time += 1)?;
        Ok(self.steps as f64 * self.interval)
    }
}
