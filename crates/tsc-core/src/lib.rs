//! `tsc-core`: foundational types for the `tsc` traffic signal control
//! workspace.
//!
//! This crate is a dependency of every other `tsc-*` crate.  It has no
//! `tsc-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `IntersectionId`, `RoadId`, `LaneId`, `VehicleId`         |
//! | [`geo`]     | `Point`, clockwise-from-North bearings                    |
//! | [`time`]    | `Tick`, `SimClock`, `WorldConfig`                         |
//! | [`rng`]     | `SimRng`                                                  |
//! | [`error`]   | `TscError`, `TscResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and `WorldConfig`.   |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TscError, TscResult};
pub use geo::Point;
pub use ids::{IntersectionId, LaneId, RoadId, VehicleId};
pub use rng::SimRng;
pub use time::{SimClock, Tick, WorldConfig};
