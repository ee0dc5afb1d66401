use thiserror::Error;

use tsc_engine::EngineError;

use crate::QueryKind;

#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Configuration error: the name is not one of the known queries.
    #[error("unknown telemetry query {0:?}")]
    UnknownQuery(String),

    /// Configuration error: the query was read without being subscribed.
    #[error("telemetry query {0} read without a subscription")]
    NotSubscribed(QueryKind),

    /// State error: no refresh has happened yet.
    #[error("telemetry read before the first reset")]
    NotInitialized,

    /// State error: subscribed after the last refresh; available after the
    /// next step.
    #[error("telemetry query {0} subscribed since the last refresh")]
    NotRefreshed(QueryKind),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;
