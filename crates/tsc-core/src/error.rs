//! Workspace-wide base error type.
//!
//! Sub-crates define their own error enums and wrap `TscError` as one
//! variant via `#[from]`, so configuration problems detected here surface
//! unchanged at the `World` boundary.

use thiserror::Error;

/// The base error type for `tsc-core`.
#[derive(Debug, Error)]
pub enum TscError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `tsc-core`.
pub type TscResult<T> = Result<T, TscError>;
