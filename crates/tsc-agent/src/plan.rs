//! Signal plan files.
//!
//! # Formats
//!
//! **Single**: one line per whole second of simulated time, holding the
//! phase to show during that second.  Values above 0 are one-based and are
//! shifted down by one; 0 stays 0.
//!
//! ```text
//! 1
//! 1
//! 2
//! ```
//!
//! **Multi**: one `time,phase` row per switch point; the phase is a
//! zero-based index.  At time `t` the first row with `time >= t` applies.
//!
//! ```csv
//! 30,0
//! 60,1
//! 90,0
//! ```
//!
//! # File naming
//!
//! | Format   | Path                         |
//! |----------|------------------------------|
//! | `Single` | `{dir}/{prefix}.txt`         |
//! | `Multi`  | `{dir}/{prefix}_{id}.txt`    |

use std::io::Read;
use std::path::{Path, PathBuf};

use tsc_core::IntersectionId;

use crate::{AgentError, AgentResult};

/// Which of the two plan layouts a file uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlanFormat {
    Single,
    Multi,
}

impl PlanFormat {
    /// Plan file location for `id` under `dir`.
    pub fn plan_path(self, dir: &Path, prefix: &str, id: &IntersectionId) -> PathBuf {
        match self {
            PlanFormat::Single => dir.join(format!("{prefix}.txt")),
            PlanFormat::Multi => dir.join(format!("{prefix}_{id}.txt")),
        }
    }
}

/// A parsed signal plan.
#[derive(Clone, Debug, PartialEq)]
pub enum SignalPlan {
    /// Phase per whole second, already zero-based.
    Single(Vec<usize>),
    /// `(time, phase)` switch points in file order.
    Multi(Vec<(f64, usize)>),
}

impl SignalPlan {
    pub fn len(&self) -> usize {
        match self {
            SignalPlan::Single(v) => v.len(),
            SignalPlan::Multi(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest phase index the plan ever requests.
    pub fn max_phase(&self) -> Option<usize> {
        match self {
            SignalPlan::Single(v) => v.iter().copied().max(),
            SignalPlan::Multi(v) => v.iter().map(|&(_, p)| p).max(),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a signal plan from a file.
pub fn load_signal_plan(path: &Path, format: PlanFormat) -> AgentResult<SignalPlan> {
    let file = std::fs::File::open(path)?;
    load_signal_plan_reader(file, format)
        .map_err(|e| match e {
            AgentError::Parse(msg) => AgentError::Parse(format!("{}: {msg}", path.display())),
            other => other,
        })
}

/// Like [`load_signal_plan`] but accepts any `Read` source.
pub fn load_signal_plan_reader<R: Read>(reader: R, format: PlanFormat) -> AgentResult<SignalPlan> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    match format {
        PlanFormat::Single => {
            let mut phases = Vec::new();
            for (line, result) in csv_reader.deserialize::<(i64,)>().enumerate() {
                let (value,) = result.map_err(|e| AgentError::Parse(e.to_string()))?;
                let phase = usize::try_from(value).map_err(|_| {
                    AgentError::Parse(format!("line {}: negative phase {value}", line + 1))
                })?;
                phases.push(phase.saturating_sub(1));
            }
            Ok(SignalPlan::Single(phases))
        }
        PlanFormat::Multi => {
            let mut rows = Vec::new();
            for (line, result) in csv_reader.deserialize::<(f64, f64)>().enumerate() {
                let (time, phase) = result.map_err(|e| AgentError::Parse(e.to_string()))?;
                if !(phase.is_finite() && phase >= 0.0) {
                    return Err(AgentError::Parse(format!("line {}: invalid phase {phase}", line + 1)));
                }
                rows.push((time, phase.trunc() as usize));
            }
            Ok(SignalPlan::Multi(rows))
        }
    }
}
