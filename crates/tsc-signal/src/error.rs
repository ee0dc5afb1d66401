use thiserror::Error;

use tsc_core::IntersectionId;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("intersection {intersection}: phase {requested} out of range ({count} phases)")]
    PhaseOutOfRange {
        intersection: IntersectionId,
        requested:    usize,
        count:        usize,
    },

    #[error("intersection {0} has no controllable phases")]
    NoPhases(IntersectionId),

    #[error("intersection {0}: yellow time is positive but no yellow phase is configured")]
    MissingYellow(IntersectionId),
}

pub type SignalResult<T> = Result<T, SignalError>;
