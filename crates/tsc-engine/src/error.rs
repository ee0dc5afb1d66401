use thiserror::Error;

use tsc_core::IntersectionId;

/// Failures reported by a simulator binding.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("simulator rejected phase {phase} for intersection {intersection}")]
    PhaseRejected { intersection: IntersectionId, phase: usize },

    #[error("simulator failure: {0}")]
    Backend(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
