//! `TscEnv`: runs one controller per intersection against a `World`.

use log::info;

use tsc_engine::Engine;
use tsc_world::World;

use crate::{AgentError, AgentResult, Controller, TravelTimeMetric};

/// What one environment step produced, indexed by intersection.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub actions:      Vec<usize>,
    pub observations: Vec<Option<Vec<f64>>>,
    pub rewards:      Vec<Option<f64>>,
    /// Mean travel time so far, when a metric is attached.
    pub travel_time:  Option<f64>,
}

/// A world plus its controllers, stepped together.
///
/// Controllers are held in intersection order; construction rejects a set
/// that does not cover every intersection exactly once in that order.
pub struct TscEnv<E: Engine> {
    world:       World<E>,
    controllers: Vec<Box<dyn Controller<E>>>,
    metric:      Option<TravelTimeMetric>,
}

impl<E: Engine> TscEnv<E> {
    pub fn new(world: World<E>, controllers: Vec<Box<dyn Controller<E>>>) -> AgentResult<Self> {
        if controllers.len() != world.intersections().len() {
            return Err(AgentError::Config(format!(
                "{} controllers for {} intersections",
                controllers.len(),
                world.intersections().len()
            )));
        }
        for (controller, id) in controllers.iter().zip(world.intersection_ids()) {
            if controller.intersection() != id {
                return Err(AgentError::Config(format!(
                    "controller for {} found where {id} was expected",
                    controller.intersection()
                )));
            }
        }
        Ok(Self { world, controllers, metric: None })
    }

    /// Attach a travel-time metric, subscribing its queries.
    pub fn with_travel_time(mut self) -> Self {
        self.metric = Some(TravelTimeMetric::new(&mut self.world));
        self
    }

    pub fn world(&self) -> &World<E> {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World<E> {
        &mut self.world
    }

    pub fn into_world(self) -> World<E> {
        self.world
    }

    pub fn metric(&self) -> Option<&TravelTimeMetric> {
        self.metric.as_ref()
    }

    /// Reset the world and the metric; return the first observations.
    pub fn reset(&mut self) -> AgentResult<Vec<Option<Vec<f64>>>> {
        self.world.reset()?;
        if let Some(metric) = &mut self.metric {
            metric.reset();
        }
        self.observations()
    }

    /// Ask every controller for an action, step the world once with them
    /// and collect what the controllers see afterwards.
    pub fn step(&mut self) -> AgentResult<Transition> {
        let actions = self
            .controllers
            .iter_mut()
            .map(|c| c.action(&self.world))
            .collect::<AgentResult<Vec<_>>>()?;
        self.world.step_with(&actions)?;

        let travel_time = match &mut self.metric {
            Some(metric) => Some(metric.update(&self.world, false)?),
            None => None,
        };
        let rewards = self
            .controllers
            .iter()
            .map(|c| c.reward(&self.world))
            .collect::<AgentResult<Vec<_>>>()?;

        Ok(Transition { actions, observations: self.observations()?, rewards, travel_time })
    }

    /// Step `steps` times, then close every open trip.  Returns the final
    /// mean travel time, or `None` without a metric.
    pub fn run(&mut self, steps: u64) -> AgentResult<Option<f64>> {
        for _ in 0..steps {
            self.step()?;
        }
        let Some(metric) = &mut self.metric else {
            return Ok(None);
        };
        let mean = metric.update(&self.world, true)?;
        info!("{steps} steps: mean travel time {mean:.2} s over {} trips", metric.completed());
        Ok(Some(mean))
    }

    fn observations(&self) -> AgentResult<Vec<Option<Vec<f64>>>> {
        self.controllers.iter().map(|c| c.observation(&self.world)).collect()
    }
}
