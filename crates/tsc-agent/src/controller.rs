//! The `Controller` trait: the extension point for signal policies.

use tsc_core::IntersectionId;
use tsc_engine::Engine;
use tsc_world::World;

use crate::AgentResult;

/// A signal policy for one intersection.
///
/// Every method reads the world between steps: phase states through
/// [`World::phase_state`] and measurements through [`World::telemetry`].
/// Controllers that need a query subscribe it when they are constructed.
///
/// # Required methods
///
/// Only [`intersection`][Self::intersection] and [`action`][Self::action]
/// are required.  Controllers without an observation or reward keep the
/// `None` defaults.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysFirst(IntersectionId);
///
/// impl<E: Engine> Controller<E> for AlwaysFirst {
///     fn intersection(&self) -> &IntersectionId { &self.0 }
///     fn action(&mut self, _world: &World<E>) -> AgentResult<usize> { Ok(0) }
/// }
/// ```
pub trait Controller<E: Engine> {
    /// The intersection this controller drives.
    fn intersection(&self) -> &IntersectionId;

    /// Feature vector describing the intersection right now.
    fn observation(&self, _world: &World<E>) -> AgentResult<Option<Vec<f64>>> {
        Ok(None)
    }

    /// Index of the controllable phase to request for the next step.
    fn action(&mut self, world: &World<E>) -> AgentResult<usize>;

    /// Scalar feedback for the last step.
    fn reward(&self, _world: &World<E>) -> AgentResult<Option<f64>> {
        Ok(None)
    }
}
