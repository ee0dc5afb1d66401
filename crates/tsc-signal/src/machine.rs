//! `PhaseStateMachine`: advances a [`PhaseState`] once per tick.

use log::debug;

use tsc_core::{IntersectionId, WorldConfig};
use tsc_roadnet::Intersection;

use crate::{PhaseState, SignalError, SignalResult};

/// Absorbs float accumulation when comparing elapsed time against the
/// yellow duration (e.g. ten 0.1 s steps against 1.0 s).
const TIME_EPS: f64 = 1e-9;

/// Drives one intersection's signal.
///
/// Cheap to clone, which lets the caller stage a tick on copies and commit
/// only once the whole tick has succeeded.
#[derive(Clone, Debug)]
pub struct PhaseStateMachine {
    id:           IntersectionId,
    /// Light phase of each controllable phase.
    light_phases: Vec<usize>,
    yellow_phase: Option<usize>,
    yellow_time:  f64,
    state:        PhaseState,
}

impl PhaseStateMachine {
    /// `light_phases[i]` is the raw light phase of controllable phase `i`.
    pub fn new(
        id:           IntersectionId,
        light_phases: Vec<usize>,
        yellow_phase: Option<usize>,
        yellow_time:  f64,
    ) -> SignalResult<Self> {
        let Some(&first) = light_phases.first() else {
            return Err(SignalError::NoPhases(id));
        };
        if yellow_time > 0.0 && yellow_phase.is_none() {
            return Err(SignalError::MissingYellow(id));
        }
        Ok(Self {
            id,
            light_phases,
            yellow_phase,
            yellow_time,
            state: PhaseState::initial(first),
        })
    }

    /// Build the machine for a topology node using the configured yellow
    /// phase and duration.
    pub fn for_intersection(ix: &Intersection, config: &WorldConfig) -> SignalResult<Self> {
        Self::new(
            ix.id.clone(),
            ix.phases.iter().map(|p| p.light_phase).collect(),
            ix.yellow_phase,
            config.yellow_phase_time,
        )
    }

    #[inline]
    pub fn id(&self) -> &IntersectionId {
        &self.id
    }

    #[inline]
    pub fn state(&self) -> &PhaseState {
        &self.state
    }

    #[inline]
    pub fn phase_count(&self) -> usize {
        self.light_phases.len()
    }

    /// Light phase shown for controllable phase `index`.
    #[inline]
    pub fn light_phase(&self, index: usize) -> Option<usize> {
        self.light_phases.get(index).copied()
    }

    /// Return to the initial state.  Yields the light phase to command so
    /// the simulator agrees with the machine.
    pub fn reset(&mut self) -> usize {
        self.state = PhaseState::initial(self.light_phases[0]);
        self.state.true_phase
    }

    /// Fail fast on a phase index this intersection does not have.
    pub fn check_phase(&self, requested: usize) -> SignalResult<()> {
        if requested >= self.light_phases.len() {
            return Err(SignalError::PhaseOutOfRange {
                intersection: self.id.clone(),
                requested,
                count: self.light_phases.len(),
            });
        }
        Ok(())
    }

    /// Advance one tick of `interval` seconds with `requested` as the
    /// controller's choice.
    ///
    /// Returns the light phase to send to the simulator when the shown phase
    /// changes, `None` on a continuation.  During a yellow transition the
    /// request is validated but otherwise ignored.
    pub fn step(&mut self, requested: usize, interval: f64) -> SignalResult<Option<usize>> {
        self.check_phase(requested)?;

        if let Some(pending) = self.state.pending_phase {
            if self.state.elapsed + TIME_EPS >= self.yellow_time {
                debug!("{}: yellow over, entering phase {pending}", self.id);
                return Ok(Some(self.enter_steady(pending, interval)));
            }
            self.state.elapsed += interval;
            return Ok(None);
        }

        if requested == self.state.current_phase {
            self.state.elapsed += interval;
            return Ok(None);
        }

        match self.yellow_phase.filter(|_| self.yellow_time > 0.0) {
            Some(yellow) => {
                debug!("{}: yellow before phase {requested}", self.id);
                self.state.true_phase = yellow;
                self.state.pending_phase = Some(requested);
                self.state.elapsed = interval;
                Ok(Some(yellow))
            }
            None => Ok(Some(self.enter_steady(requested, interval))),
        }
    }

    fn enter_steady(&mut self, phase: usize, interval: f64) -> usize {
        let light = self.light_phases[phase];
        self.state = PhaseState {
            current_phase: phase,
            true_phase:    light,
            elapsed:       interval,
            pending_phase: None,
        };
        light
    }
}
