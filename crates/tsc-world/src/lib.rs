//! `tsc-world`: the step coordinator of the tsc workspace.
//!
//! # One tick
//!
//! ```text
//! World::step():
//!   ① Decide     feed every intersection's requested phase to its
//!                PhaseStateMachine; collect the light phases to command.
//!   ② Command    Engine::set_tl_phase for each collected command.
//!   ③ Advance    Engine::next_step.
//!   ④ Refresh    run every subscribed telemetry query once.
//!   ⑤ Commit     swap in the new phase states and advance the clock.
//! ```
//!
//! All commands of a tick happen before the advance, which happens before
//! the refresh.  If any stage fails the phase states and the telemetry
//! snapshot stay at their last committed values.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tsc_core::WorldConfig;
//! use tsc_engine::ScriptedEngine;
//! use tsc_telemetry::QueryKind;
//! use tsc_world::WorldBuilder;
//!
//! let mut world = WorldBuilder::new(WorldConfig::default(), ScriptedEngine::new(1.0))
//!     .roadnet_file("roadnet.json")
//!     .subscribe(QueryKind::LaneCount)
//!     .build()?;
//! world.reset()?;
//! world.request_phase("intersection_1_1", 1)?;
//! world.step()?;
//! let counts = world.telemetry().lane_count()?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod world;


pub use builder::WorldBuilder;
pub use error::{WorldError, WorldResult};
pub use observer::{NoopObserver, WorldObserver};
pub use world::World;
