use thiserror::Error;

use tsc_telemetry::TelemetryError;
use tsc_world::WorldError;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("controller configuration error: {0}")]
    Config(String),

    #[error("signal plan parse error: {0}")]
    Parse(String),

    #[error("signal plan for {intersection} has no entry for time {time}")]
    PlanExhausted {
        intersection: String,
        time:         f64,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

pub type AgentResult<T> = Result<T, AgentError>;
