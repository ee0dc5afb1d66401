//! Simulation time model.
//!
//! # Design
//!
//! The simulator advances in fixed steps of `interval` seconds.  The
//! canonical step counter is the integer `Tick`; `SimClock` maps it to
//! simulated seconds:
//!
//!   elapsed_secs = tick * interval
//!
//! Phase durations (yellow time, minimum green) are measured in seconds so
//! that controllers written for a 1 s interval keep their meaning when the
//! interval changes.

use std::fmt;

use crate::{TscError, TscResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.  Tick 0 is the state right after
/// `reset`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and converts it to simulated seconds.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Simulated seconds per tick (Δt).
    pub interval: f64,
    /// The current tick, advanced by `SimClock::advance()` after each step.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(interval: f64) -> Self {
        Self { interval, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Rewind to tick 0.
    #[inline]
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }

    /// Simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.interval
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1} s)", self.current_tick, self.elapsed_secs())
    }
}

// ── WorldConfig ───────────────────────────────────────────────────────────────

/// Signal-control configuration shared by the world and its controllers.
///
/// Typically built in code or deserialized from the application's own
/// config file; the simulator's config file is handled separately by
/// `tsc_roadnet::EngineFileConfig`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Seconds per simulation step.  Default: 1.0.
    pub interval: f64,

    /// Duration of the mandatory yellow transition in seconds.  `0` switches
    /// phases instantly.  Default: 3.0.
    pub yellow_phase_time: f64,

    /// Raw light-phase indices reserved for yellow.  They are excluded from
    /// every intersection's controllable phase list; the first entry is the
    /// phase commanded during transitions.  Default: `[0]`.
    pub yellow_phase_ids: Vec<usize>,

    /// Vehicles drive on the right.  Governs the road-ordering tie-break and
    /// the lane listing direction.  Default: `true`.
    pub right_hand_traffic: bool,

    /// Master seed for randomized controllers.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            interval:           1.0,
            yellow_phase_time:  3.0,
            yellow_phase_ids:   vec![0],
            right_hand_traffic: true,
            seed:               0,
        }
    }
}

impl WorldConfig {
    /// The light-phase index commanded during yellow transitions.
    #[inline]
    pub fn yellow_phase_id(&self) -> Option<usize> {
        self.yellow_phase_ids.first().copied()
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.interval)
    }

    /// Reject configurations the phase state machine cannot run with.
    pub fn validate(&self) -> TscResult<()> {
        if !(self.interval.is_finite() && self.interval > 0.0) {
            return Err(TscError::Config(format!(
                "interval must be a positive number of seconds, got {}",
                self.interval
            )));
        }
        if !(self.yellow_phase_time.is_finite() && self.yellow_phase_time >= 0.0) {
            return Err(TscError::Config(format!(
                "yellow_phase_time must be >= 0, got {}",
                self.yellow_phase_time
            )));
        }
        if self.yellow_phase_time > 0.0 && self.yellow_phase_ids.is_empty() {
            return Err(TscError::Config(
                "yellow_phase_time > 0 requires at least one yellow phase id".into(),
            ));
        }
        Ok(())
    }
}
