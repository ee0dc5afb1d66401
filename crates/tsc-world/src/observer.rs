//! World observer trait for progress reporting and data collection.

use tsc_core::{IntersectionId, Tick};

/// Callbacks invoked by [`World::reset_observed`][crate::World::reset_observed]
/// and [`World::step_observed`][crate::World::step_observed].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: command counter
///
/// ```rust,ignore
/// struct CommandCounter(usize);
///
/// impl WorldObserver for CommandCounter {
///     fn on_phase_command(&mut self, _tick: Tick, _id: &IntersectionId, _phase: usize) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait WorldObserver {
    /// Called after a successful reset.
    fn on_reset(&mut self) {}

    /// Called at the very start of each tick, before any phase decision.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for every light phase sent to the simulator, after the send
    /// succeeded.
    fn on_phase_command(&mut self, _tick: Tick, _intersection: &IntersectionId, _light_phase: usize) {}

    /// Called once the tick has been committed.
    ///
    /// `commands` is the number of phase commands issued this tick.
    fn on_tick_end(&mut self, _tick: Tick, _commands: usize) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
