//! `FixedTimeController`: replays a precomputed signal plan.

use std::path::Path;

use log::debug;

use tsc_core::IntersectionId;
use tsc_engine::Engine;
use tsc_world::World;

use crate::{AgentError, AgentResult, Controller, PlanFormat, SignalPlan, load_signal_plan};

/// Requests whatever phase the plan lists for the current simulated time.
///
/// Time is read from the world's clock.  For multi-row plans the search
/// resumes one row before the last match, so a run that moves forward in
/// time scans each row a bounded number of times.
pub struct FixedTimeController {
    id:     IntersectionId,
    plan:   SignalPlan,
    cursor: usize,
    last:   usize,
}

impl FixedTimeController {
    /// Wrap an already parsed plan.  Fails if the plan requests a phase the
    /// intersection does not have.
    pub fn new<E: Engine>(world: &World<E>, id: IntersectionId, plan: SignalPlan) -> AgentResult<Self> {
        let phases = world.topology_for(id.as_str())?.phase_count();
        if let Some(max) = plan.max_phase() {
            if max >= phases {
                return Err(AgentError::Config(format!(
                    "{id}: plan requests phase {max} but only {phases} phases exist"
                )));
            }
        }
        Ok(Self { id, plan, cursor: 0, last: 0 })
    }

    /// Load the plan for `id` from `dir` using the naming convention of
    /// `format`.
    pub fn from_dir<E: Engine>(
        world:  &World<E>,
        id:     IntersectionId,
        dir:    &Path,
        prefix: &str,
        format: PlanFormat,
    ) -> AgentResult<Self> {
        let path = format.plan_path(dir, prefix, &id);
        debug!("{id}: loading signal plan {}", path.display());
        let plan = load_signal_plan(&path, format)?;
        Self::new(world, id, plan)
    }

    pub fn plan(&self) -> &SignalPlan {
        &self.plan
    }

    /// Phase returned by the most recent `action`.
    pub fn last_action(&self) -> usize {
        self.last
    }

    /// Plan lookup for simulated time `now`.
    pub fn phase_at(&mut self, now: f64) -> AgentResult<usize> {
        let exhausted = || AgentError::PlanExhausted { intersection: self.id.to_string(), time: now };
        let phase = match &self.plan {
            SignalPlan::Single(phases) => {
                *phases.get(now.trunc() as usize).ok_or_else(exhausted)?
            }
            SignalPlan::Multi(rows) => {
                let offset = rows[self.cursor.min(rows.len())..]
                    .iter()
                    .position(|&(time, _)| time >= now)
                    .ok_or_else(exhausted)?;
                let i = self.cursor + offset;
                self.cursor = i.saturating_sub(1);
                rows[i].1
            }
        };
        self.last = phase;
        Ok(phase)
    }
}

impl<E: Engine> Controller<E> for FixedTimeController {
    fn intersection(&self) -> &IntersectionId {
        &self.id
    }

    fn action(&mut self, world: &World<E>) -> AgentResult<usize> {
        self.phase_at(world.clock().elapsed_secs())
    }
}
