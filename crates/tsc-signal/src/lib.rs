//! `tsc-signal`: the per-intersection phase state machine.
//!
//! # States
//!
//! ```text
//!            request a == current
//!          ┌─────────────────────┐
//!          ▼                     │
//!      ┌────────┐  request a ≠ current   ┌───────────────┐
//!      │ Steady │ ─────────────────────▶ │ Transitioning │ ─┐ elapsed < yellow
//!      └────────┘  (yellow time > 0)     └───────────────┘ ◀┘
//!          ▲                                      │
//!          └──────── elapsed ≥ yellow ────────────┘
//! ```
//!
//! With a yellow time of 0 a differing request switches phases directly.
//! Every state change yields exactly one light phase for the caller to send
//! to the simulator; continuations yield nothing.
//!
//! The machine enforces no minimum green time.  Controllers that need one
//! check [`PhaseState::elapsed`] themselves.

pub mod error;
pub mod machine;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{SignalError, SignalResult};
pub use machine::PhaseStateMachine;
pub use state::PhaseState;
