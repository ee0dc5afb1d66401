//! `tsc-agent`: signal controllers and the measurements they consume.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                        |
//! |------------------|-----------------------------------------------------------------|
//! | [`controller`]   | `Controller` trait: observation, action, reward                 |
//! | [`fixed_time`]   | `FixedTimeController`: replays a signal plan                    |
//! | [`plan`]         | `SignalPlan`, `PlanFormat`, plan file loaders                   |
//! | [`max_pressure`] | `MaxPressureController`: greedy pressure with a minimum green   |
//! | [`random`]       | `RandomController`: uniform phase choice, seeded                |
//! | [`generator`]    | `LaneVehicleGenerator`: per-lane count vectors                  |
//! | [`metric`]       | `TravelTimeMetric`: mean vehicle travel time                    |
//! | [`env`]          | `TscEnv`: one controller per intersection driving a `World`     |
//! | [`error`]        | `AgentError`, `AgentResult<T>`                                  |
//!
//! # Decision loop
//!
//! ```text
//! TscEnv::step():
//!   actions[i] = controllers[i].action(&world)     (intersection order)
//!   world.step_with(&actions)
//!   metric.update(&world)
//!   observations[i], rewards[i] from the refreshed telemetry
//! ```
//!
//! Controllers never talk to the simulator directly; everything they read
//! comes from the world's telemetry snapshot and phase states.

pub mod controller;
pub mod env;
pub mod error;
pub mod fixed_time;
pub mod generator;
pub mod max_pressure;
pub mod metric;
pub mod plan;
pub mod random;


pub use controller::Controller;
pub use env::{Transition, TscEnv};
pub use error::{AgentError, AgentResult};
pub use fixed_time::FixedTimeController;
pub use generator::{Average, LaneStat, LaneVehicleGenerator, LaneVehicleOptions};
pub use max_pressure::MaxPressureController;
pub use metric::TravelTimeMetric;
pub use plan::{PlanFormat, SignalPlan, load_signal_plan, load_signal_plan_reader};
pub use random::RandomController;
