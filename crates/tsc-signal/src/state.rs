//! The mutable per-intersection signal state.

/// Signal state of one intersection.
///
/// Invariants maintained by [`PhaseStateMachine`][crate::PhaseStateMachine]:
///
/// - `pending_phase.is_some()` exactly while a yellow transition runs, and
///   then `true_phase` is the yellow light phase.
/// - Otherwise `true_phase` is the light phase of `current_phase`.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseState {
    /// Index into the intersection's controllable phases.  During a yellow
    /// transition this is still the phase being left.
    pub current_phase: usize,

    /// Raw light phase currently shown, yellow included.
    pub true_phase: usize,

    /// Seconds since `true_phase` last changed.
    pub elapsed: f64,

    /// Phase requested when the running yellow transition began.
    pub pending_phase: Option<usize>,
}

impl PhaseState {
    /// The state every intersection starts in: first controllable phase,
    /// no time elapsed, nothing pending.
    pub fn initial(first_light_phase: usize) -> Self {
        Self {
            current_phase: 0,
            true_phase:    first_light_phase,
            elapsed:       0.0,
            pending_phase: None,
        }
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.pending_phase.is_some()
    }
}
