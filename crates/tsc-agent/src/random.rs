//! `RandomController`: uniform phase choice.

use tsc_core::{IntersectionId, SimRng};
use tsc_engine::Engine;
use tsc_world::World;

use crate::{AgentError, AgentResult, Controller, LaneVehicleGenerator};

/// Samples a phase uniformly each step from a seeded stream.
///
/// Stands in for a learned policy: it carries optional observation and
/// reward generators so the surrounding loop can be exercised without one.
/// The reward is the mean of the reward generator's vector.
pub struct RandomController {
    id:          IntersectionId,
    phases:      usize,
    rng:         SimRng,
    observation: Option<LaneVehicleGenerator>,
    reward:      Option<LaneVehicleGenerator>,
}

impl RandomController {
    /// The stream is derived from the world's seed and the intersection's
    /// position, so runs with the same seed repeat exactly.
    pub fn new<E: Engine>(world: &World<E>, id: IntersectionId) -> AgentResult<Self> {
        let position = world
            .roadnet()
            .intersection_position(id.as_str())
            .ok_or_else(|| AgentError::Config(format!("unknown intersection {id}")))?;
        let phases = world.intersections()[position].phase_count();
        Ok(Self {
            rng: SimRng::for_stream(world.config().seed, position),
            id,
            phases,
            observation: None,
            reward: None,
        })
    }

    pub fn with_observation(mut self, generator: LaneVehicleGenerator) -> Self {
        self.observation = Some(generator);
        self
    }

    pub fn with_reward(mut self, generator: LaneVehicleGenerator) -> Self {
        self.reward = Some(generator);
        self
    }
}

impl<E: Engine> Controller<E> for RandomController {
    fn intersection(&self) -> &IntersectionId {
        &self.id
    }

    fn observation(&self, world: &World<E>) -> AgentResult<Option<Vec<f64>>> {
        self.observation
            .as_ref()
            .map(|g| g.generate_for(world, &self.id))
            .transpose()
    }

    fn action(&mut self, _world: &World<E>) -> AgentResult<usize> {
        self.rng
            .index(self.phases)
            .ok_or_else(|| AgentError::Config(format!("{} has no phases", self.id)))
    }

    fn reward(&self, world: &World<E>) -> AgentResult<Option<f64>> {
        let Some(generator) = &self.reward else {
            return Ok(None);
        };
        let values = generator.generate_for(world, &self.id)?;
        if values.is_empty() {
            return Ok(Some(0.0));
        }
        Ok(Some(values.iter().sum::<f64>() / values.len() as f64))
    }
}
