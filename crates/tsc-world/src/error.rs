use thiserror::Error;

use tsc_core::TscError;
use tsc_engine::EngineError;
use tsc_roadnet::RoadnetError;
use tsc_signal::SignalError;
use tsc_telemetry::TelemetryError;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("world configuration error: {0}")]
    Config(String),

    #[error("unknown intersection {0:?}")]
    UnknownIntersection(String),

    #[error("expected one action per intersection ({expected}), got {got}")]
    ActionCount {
        expected: usize,
        got:      usize,
    },

    #[error("world has not been reset yet")]
    NotReset,

    #[error(transparent)]
    Core(#[from] TscError),

    #[error("road net error: {0}")]
    Roadnet(#[from] RoadnetError),

    #[error("signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

pub type WorldResult<T> = Result<T, WorldError>;
