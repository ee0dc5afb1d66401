//! `tsc-roadnet`: road-net loading and intersection topology.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                    |
//! |------------------|-------------------------------------------------------------|
//! | [`loader`]       | Raw description records, `load_roadnet`, `EngineFileConfig` |
//! | [`intersection`] | `Intersection`, `RoadLink`, `LaneLink`, `Phase`, `RoadRef`  |
//! | [`network`]      | `RoadNet`, `Road`: the built, immutable topology            |
//! | [`topology`]     | The builder: ordering, lane derivation, phase tables        |
//! | [`error`]        | `RoadnetError`, `RoadnetResult<T>`                          |
//!
//! # Build pipeline
//!
//! ```text
//! JSON file ──load_roadnet──▶ RawRoadnet ──RoadNet::build──▶ RoadNet
//! ```
//!
//! The build is all-or-nothing: any dangling id or malformed record aborts
//! it and no partially built `RoadNet` is returned.

pub mod error;
pub mod intersection;
pub mod loader;
pub mod network;
pub mod topology;

#[cfg(test)]
mod tests;

pub use error::{RoadnetError, RoadnetResult};
pub use intersection::{Intersection, LaneLink, Phase, RoadLink, RoadRef};
pub use loader::{EngineFileConfig, RawRoadnet, load_roadnet, load_roadnet_reader};
pub use network::{LaneSpec, Road, RoadNet};
