//! `tsc-engine`: the simulator seen from the signal-control core.
//!
//! The microscopic simulator (vehicle physics, car following, routing) is
//! an external collaborator.  This crate pins down the only capabilities the
//! core needs from it:
//!
//! | Capability                  | Method                                                              |
//! |-----------------------------|---------------------------------------------------------------------|
//! | advance one tick            | [`Engine::next_step`]                                               |
//! | rewind to initial state     | [`Engine::reset`]                                                   |
//! | set an intersection's phase | [`Engine::set_tl_phase`]                                            |
//! | per-lane measurements       | `lane_vehicle_count`, `lane_waiting_vehicle_count`, `lane_vehicles` |
//! | per-vehicle measurements    | [`Engine::vehicle_distance`]                                        |
//! | clock                       | [`Engine::current_time`]                                            |
//!
//! All calls are blocking and synchronous.  A binding that runs its own
//! worker threads keeps them behind this interface.
//!
//! [`ScriptedEngine`] is a deterministic in-memory implementation whose
//! measurements are set by the caller; tests and demos drive the core with
//! it.

pub mod engine;
pub mod error;
pub mod scripted;


pub use engine::{Engine, LaneCounts, LaneVehicles, VehicleDistances};
pub use error::{EngineError, EngineResult};
pub use scripted::{CommandRecord, QueryCalls, ScriptedEngine};
