//! `MaxPressureController`: greedy pressure release.

use tsc_core::IntersectionId;
use tsc_engine::Engine;
use tsc_telemetry::QueryKind;
use tsc_world::World;

use crate::{AgentResult, Controller};

/// Minimum seconds a phase is held before the controller reconsiders.
pub const DEFAULT_T_MIN: f64 = 5.0;

/// Picks the phase whose lane movements carry the largest pressure.
///
/// The pressure of a phase is `Σ count(start) − count(end)` over its lane
/// links, using the cached lane vehicle counts.  Lanes missing from the
/// snapshot count as empty.  Ties go to the lowest phase index.
///
/// While the current phase has been shown for less than `t_min` seconds
/// the controller keeps requesting it.
pub struct MaxPressureController {
    id:    IntersectionId,
    t_min: f64,
}

impl MaxPressureController {
    /// Validate `id` and subscribe the lane count query.
    pub fn new<E: Engine>(world: &mut World<E>, id: IntersectionId) -> AgentResult<Self> {
        world.topology_for(id.as_str())?;
        world.subscribe(QueryKind::LaneCount);
        Ok(Self { id, t_min: DEFAULT_T_MIN })
    }

    pub fn with_t_min(mut self, t_min: f64) -> Self {
        self.t_min = t_min;
        self
    }

    pub fn t_min(&self) -> f64 {
        self.t_min
    }

    /// Pressure of every controllable phase, in phase order.
    pub fn pressures<E: Engine>(&self, world: &World<E>) -> AgentResult<Vec<i64>> {
        let counts = world.telemetry().lane_count()?;
        let count = |lane: &str| counts.get(lane).copied().unwrap_or(0) as i64;
        let ix = world.topology_for(self.id.as_str())?;
        Ok(ix
            .phases
            .iter()
            .map(|phase| {
                phase
                    .lanelinks
                    .iter()
                    .map(|link| count(link.start.as_str()) - count(link.end.as_str()))
                    .sum()
            })
            .collect())
    }
}

impl<E: Engine> Controller<E> for MaxPressureController {
    fn intersection(&self) -> &IntersectionId {
        &self.id
    }

    fn action(&mut self, world: &World<E>) -> AgentResult<usize> {
        let state = world.phase_state(self.id.as_str())?;
        if state.elapsed < self.t_min {
            return Ok(state.current_phase);
        }

        let mut best: Option<(usize, i64)> = None;
        for (phase, pressure) in self.pressures(world)?.into_iter().enumerate() {
            if best.is_none_or(|(_, max)| pressure > max) {
                best = Some((phase, pressure));
            }
        }
        Ok(best.map_or(state.current_phase, |(phase, _)| phase))
    }
}
