//! The `World` struct and its step loop.

use std::sync::Arc;

use log::{debug, trace};

use tsc_core::{IntersectionId, SimClock, Tick, WorldConfig};
use tsc_engine::Engine;
use tsc_roadnet::{Intersection, RoadNet};
use tsc_signal::{PhaseState, PhaseStateMachine};
use tsc_telemetry::{QueryKind, QueryValue, TelemetryCache};

use crate::{NoopObserver, WorldError, WorldObserver, WorldResult};

/// Couples the immutable topology, one phase machine per controllable
/// intersection, the telemetry cache and the simulator.
///
/// Controllers interact with it through a narrow surface:
/// [`topology_for`][Self::topology_for], [`subscribe`][Self::subscribe],
/// [`get_cached`][Self::get_cached], [`request_phase`][Self::request_phase],
/// [`step`][Self::step] and [`reset`][Self::reset].
///
/// Requested phases persist: an intersection keeps its last request until
/// a new one arrives, and `reset` sets every request back to phase 0.
///
/// Create via [`WorldBuilder`][crate::WorldBuilder].
pub struct World<E: Engine> {
    pub(crate) config:    WorldConfig,
    pub(crate) clock:     SimClock,
    pub(crate) roadnet:   Arc<RoadNet>,
    /// Parallel to `roadnet.intersections`.
    pub(crate) machines:  Vec<PhaseStateMachine>,
    /// Parallel to `machines`.
    pub(crate) requested: Vec<usize>,
    pub(crate) telemetry: TelemetryCache,
    pub(crate) engine:    E,
    /// Set by the first successful reset.
    pub(crate) ready:     bool,
}

impl<E: Engine> World<E> {
    // ── Topology ──────────────────────────────────────────────────────────

    pub fn roadnet(&self) -> &Arc<RoadNet> {
        &self.roadnet
    }

    /// Controllable intersections in description order.
    pub fn intersections(&self) -> &[Intersection] {
        &self.roadnet.intersections
    }

    pub fn intersection_ids(&self) -> impl Iterator<Item = &IntersectionId> + '_ {
        self.roadnet.intersection_ids()
    }

    pub fn topology_for(&self, id: &str) -> WorldResult<&Intersection> {
        self.roadnet
            .intersection(id)
            .ok_or_else(|| WorldError::UnknownIntersection(id.to_owned()))
    }

    /// Number of controllable phases per intersection, in intersection order.
    pub fn action_dims(&self) -> Vec<usize> {
        self.machines.iter().map(PhaseStateMachine::phase_count).collect()
    }

    // ── Telemetry ─────────────────────────────────────────────────────────

    /// Subscribe a query.  It is filled in from the next step or reset on.
    pub fn subscribe(&mut self, kind: QueryKind) -> bool {
        self.telemetry.subscribe(kind)
    }

    pub fn subscribe_name(&mut self, name: &str) -> WorldResult<QueryKind> {
        Ok(self.telemetry.subscribe_name(name)?)
    }

    pub fn get_cached(&self, kind: QueryKind) -> WorldResult<QueryValue<'_>> {
        Ok(self.telemetry.get(kind)?)
    }

    /// Typed read access to the latest snapshot.
    pub fn telemetry(&self) -> &TelemetryCache {
        &self.telemetry
    }

    // ── Signal state ──────────────────────────────────────────────────────

    /// Set the phase `id` should move to on the next step.
    ///
    /// Fails immediately on an unknown intersection or a phase index the
    /// intersection does not have.
    pub fn request_phase(&mut self, id: &str, phase: usize) -> WorldResult<()> {
        let pos = self.position(id)?;
        self.machines[pos].check_phase(phase)?;
        self.requested[pos] = phase;
        Ok(())
    }

    /// The phase currently requested for `id`.
    pub fn requested_phase(&self, id: &str) -> WorldResult<usize> {
        Ok(self.requested[self.position(id)?])
    }

    pub fn phase_state(&self, id: &str) -> WorldResult<&PhaseState> {
        Ok(self.machines[self.position(id)?].state())
    }

    /// Phase states in intersection order.
    pub fn phase_states(&self) -> impl Iterator<Item = &PhaseState> + '_ {
        self.machines.iter().map(PhaseStateMachine::state)
    }

    // ── Clock & engine ────────────────────────────────────────────────────

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Ticks stepped since the last reset.
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Direct simulator access, e.g. to load traffic between episodes.
    /// Phase commands sent this way bypass the state machines.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    // ── Step loop ─────────────────────────────────────────────────────────

    /// Reset the simulator and every phase state, then refresh telemetry.
    pub fn reset(&mut self) -> WorldResult<()> {
        self.reset_observed(&mut NoopObserver)
    }

    /// [`reset`][Self::reset] with observer callbacks.
    ///
    /// Every intersection is commanded to its initial light phase so the
    /// simulator agrees with the machines.  If any part fails the world stays
    /// unusable until a later reset succeeds.
    pub fn reset_observed<O: WorldObserver>(&mut self, observer: &mut O) -> WorldResult<()> {
        self.ready = false;
        self.engine.reset()?;

        let mut staged = self.machines.clone();
        for machine in staged.iter_mut() {
            let light = machine.reset();
            self.engine.set_tl_phase(machine.id(), light)?;
            observer.on_phase_command(Tick::ZERO, machine.id(), light);
        }
        self.telemetry.refresh(&self.engine)?;

        self.machines = staged;
        self.requested.iter_mut().for_each(|r| *r = 0);
        self.clock.reset();
        self.ready = true;
        debug!("world reset: {} intersections", self.machines.len());
        observer.on_reset();
        Ok(())
    }

    /// Run one tick with the currently requested phases.
    pub fn step(&mut self) -> WorldResult<()> {
        self.step_observed(&mut NoopObserver)
    }

    /// Request one phase per intersection (in intersection order), then step.
    ///
    /// All actions are validated before any request changes.
    pub fn step_with(&mut self, actions: &[usize]) -> WorldResult<()> {
        if actions.len() != self.machines.len() {
            return Err(WorldError::ActionCount { expected: self.machines.len(), got: actions.len() });
        }
        for (machine, &phase) in self.machines.iter().zip(actions) {
            machine.check_phase(phase)?;
        }
        self.requested.copy_from_slice(actions);
        self.step()
    }

    /// [`step`][Self::step] with observer callbacks.
    pub fn step_observed<O: WorldObserver>(&mut self, observer: &mut O) -> WorldResult<()> {
        if !self.ready {
            return Err(WorldError::NotReset);
        }
        let now = self.clock.current_tick;
        let interval = self.config.interval;
        observer.on_tick_start(now);

        // ── Decide on copies so a failure leaves the committed state ──────
        let mut staged = self.machines.clone();
        let mut commands: Vec<(usize, usize)> = Vec::new();
        for (i, (machine, &requested)) in staged.iter_mut().zip(&self.requested).enumerate() {
            if let Some(light) = machine.step(requested, interval)? {
                commands.push((i, light));
            }
        }

        // ── Command, advance, refresh ─────────────────────────────────────
        for &(i, light) in &commands {
            let id = staged[i].id();
            debug!("{now}: {id} -> light phase {light}");
            self.engine.set_tl_phase(id, light)?;
            observer.on_phase_command(now, id, light);
        }
        self.engine.next_step()?;
        self.telemetry.refresh(&self.engine)?;

        // ── Commit ────────────────────────────────────────────────────────
        self.machines = staged;
        self.clock.advance();
        trace!("{now}: committed with {} commands, clock at {}", commands.len(), self.clock);
        observer.on_tick_end(now, commands.len());
        Ok(())
    }

    fn position(&self, id: &str) -> WorldResult<usize> {
        self.roadnet
            .intersection_position(id)
            .ok_or_else(|| WorldError::UnknownIntersection(id.to_owned()))
    }
}
